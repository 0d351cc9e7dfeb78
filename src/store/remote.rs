/// GitHub contents API client for the remote measurement file.
///
/// The measurement collection lives as one JSON file in a Git repository;
/// reads GET the file through the contents API and writes PUT the whole
/// array back with the current blob sha. Full-file replacement,
/// last-writer-wins — the repository history is the audit trail.
///
/// A 404 means the data file has never been written: an empty store, not
/// an error. A file that decodes but does not parse as a measurement
/// array also reads as empty, so a hand-edited or foreign file cannot
/// take the service down.

use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::Config;
use crate::model::{EcomonError, Measurement};

const GITHUB_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "ecomon-service";
const REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Fully-resolved coordinates of the remote data file.
#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub path: String,
    pub token: String,
}

impl RemoteSettings {
    /// Resolves settings from the loaded config and a token. Returns
    /// `None` when owner, repo, or token is missing — the store then runs
    /// without a remote.
    pub fn resolve(config: &Config, token: Option<String>) -> Option<RemoteSettings> {
        Some(RemoteSettings {
            owner: config.github.owner.clone()?,
            repo: config.github.repo.clone()?,
            branch: config.github.branch.clone(),
            path: config.github.path.clone(),
            token: token?,
        })
    }
}

/// Contents API URL for the data file.
pub fn contents_url(settings: &RemoteSettings) -> String {
    format!(
        "{}/repos/{}/{}/contents/{}",
        GITHUB_API_BASE, settings.owner, settings.repo, settings.path
    )
}

// ---------------------------------------------------------------------------
// API response structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: Option<String>,
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    commit: CommitInfo,
}

#[derive(Debug, Deserialize)]
struct CommitInfo {
    sha: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct RemoteStore {
    client: Client,
    settings: RemoteSettings,
}

impl RemoteStore {
    pub fn new(settings: RemoteSettings) -> Result<Self, EcomonError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| EcomonError::RemoteUnavailable(e.to_string()))?;
        Ok(RemoteStore { client, settings })
    }

    /// Fetches the measurement collection from the remote file.
    pub fn fetch(&self) -> Result<Vec<Measurement>, EcomonError> {
        let (measurements, _) = self.fetch_with_sha()?;
        Ok(measurements)
    }

    /// Fetches the collection along with the current blob sha, which a
    /// subsequent PUT must echo back.
    fn fetch_with_sha(&self) -> Result<(Vec<Measurement>, Option<String>), EcomonError> {
        let response = self
            .client
            .get(contents_url(&self.settings))
            .query(&[("ref", self.settings.branch.as_str())])
            .bearer_auth(&self.settings.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .send()
            .map_err(|e| EcomonError::RemoteUnavailable(e.to_string()))?;

        if response.status().as_u16() == 404 {
            // Data file not created yet - empty store
            return Ok((Vec::new(), None));
        }
        if !response.status().is_success() {
            return Err(EcomonError::HttpError(response.status().as_u16()));
        }

        let body: ContentsResponse = response
            .json()
            .map_err(|e| EcomonError::ParseError(e.to_string()))?;

        // The API wraps base64 at 60 columns; strip the embedded newlines
        // before decoding.
        let encoded: String = body
            .content
            .unwrap_or_default()
            .split_whitespace()
            .collect();
        let raw = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| EcomonError::ParseError(e.to_string()))?;

        let measurements = serde_json::from_slice(&raw).unwrap_or_default();
        Ok((measurements, Some(body.sha)))
    }

    /// Replaces the remote file with the given collection. Returns the
    /// sha of the commit that recorded the write.
    pub fn commit(&self, measurements: &[Measurement]) -> Result<String, EcomonError> {
        let (_, sha) = self.fetch_with_sha()?;

        let json = serde_json::to_string_pretty(measurements)
            .map_err(|e| EcomonError::ParseError(e.to_string()))?;
        let mut body = serde_json::json!({
            "message": format!("chore(ecomon): update data {}", Utc::now().to_rfc3339()),
            "content": general_purpose::STANDARD.encode(json),
            "branch": self.settings.branch,
        });
        if let Some(sha) = sha {
            body["sha"] = serde_json::Value::String(sha);
        }

        let response = self
            .client
            .put(contents_url(&self.settings))
            .bearer_auth(&self.settings.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .map_err(|e| EcomonError::RemoteUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EcomonError::HttpError(response.status().as_u16()));
        }

        let put: PutResponse = response
            .json()
            .map_err(|e| EcomonError::ParseError(e.to_string()))?;
        Ok(put.commit.sha)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, GithubSettings};

    fn settings() -> RemoteSettings {
        RemoteSettings {
            owner: "acme".to_string(),
            repo: "field-data".to_string(),
            branch: "main".to_string(),
            path: "data/ecomon.json".to_string(),
            token: "t".to_string(),
        }
    }

    #[test]
    fn test_contents_url_shape() {
        assert_eq!(
            contents_url(&settings()),
            "https://api.github.com/repos/acme/field-data/contents/data/ecomon.json"
        );
    }

    #[test]
    fn test_resolve_requires_owner_repo_and_token() {
        let mut config = Config::default();
        config.github = GithubSettings {
            owner: Some("acme".to_string()),
            repo: Some("field-data".to_string()),
            branch: "main".to_string(),
            path: "data/ecomon.json".to_string(),
        };

        assert!(RemoteSettings::resolve(&config, Some("t".to_string())).is_some());
        assert!(RemoteSettings::resolve(&config, None).is_none());

        config.github.owner = None;
        assert!(RemoteSettings::resolve(&config, Some("t".to_string())).is_none());
    }
}
