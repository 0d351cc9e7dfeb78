/// Configuration loading for the monitoring service.
///
/// Settings are split the way the deployment is split: an `ecomon.toml`
/// file controls local behavior (cache path, strict-remote mode, log
/// file), while the GitHub repository coordinates and token come from
/// environment variables (`.env` in development), matching the variable
/// set the hosted function uses: `GITHUB_TOKEN`, `GITHUB_OWNER`,
/// `GITHUB_REPO`, `GITHUB_BRANCH`, `GITHUB_PATH`.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

use crate::model::EcomonError;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "ecomon.toml";

// ---------------------------------------------------------------------------
// Settings sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Local JSON cache file, the fast read path.
    pub cache_path: String,
    /// When set, the remote file is the single source of truth: appends
    /// are refused rather than written locally if the remote is down.
    pub require_remote: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            cache_path: "ecomon_cache.json".to_string(),
            require_remote: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GithubSettings {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: String,
    /// Path of the data file inside the repository.
    pub path: String,
}

impl Default for GithubSettings {
    fn default() -> Self {
        GithubSettings {
            owner: None,
            repo: None,
            branch: "main".to_string(),
            path: "data/ecomon.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreSettings,
    pub github: GithubSettings,
    /// Optional log file for unattended runs.
    pub log_file: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Parses a config from TOML text. Unknown keys are ignored; missing
    /// sections fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Config, EcomonError> {
        toml::from_str(text).map_err(|e| EcomonError::ParseError(e.to_string()))
    }

    /// Applies environment-variable overrides for the GitHub coordinates.
    /// The token is intentionally never part of `Config`; see
    /// [`github_token`].
    pub fn with_env_overrides(mut self) -> Config {
        if let Ok(owner) = env::var("GITHUB_OWNER") {
            if !owner.is_empty() {
                self.github.owner = Some(owner);
            }
        }
        if let Ok(repo) = env::var("GITHUB_REPO") {
            if !repo.is_empty() {
                self.github.repo = Some(repo);
            }
        }
        if let Ok(branch) = env::var("GITHUB_BRANCH") {
            if !branch.is_empty() {
                self.github.branch = branch;
            }
        }
        if let Ok(path) = env::var("GITHUB_PATH") {
            if !path.is_empty() {
                self.github.path = path;
            }
        }
        self
    }
}

/// Loads configuration from a TOML file plus environment overrides.
/// A missing file is not an error — defaults apply.
pub fn load_config(path: &Path) -> Result<Config, EcomonError> {
    let config = if path.exists() {
        let text = fs::read_to_string(path).map_err(|e| EcomonError::Io(e.to_string()))?;
        Config::from_toml_str(&text)?
    } else {
        Config::default()
    };
    Ok(config.with_env_overrides())
}

/// Reads the GitHub token from the environment. Kept out of the config
/// struct so it can never end up in a serialized report or log.
pub fn github_token() -> Option<String> {
    env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
