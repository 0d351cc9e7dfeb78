//! Data Source Verification Module
//!
//! Framework for testing the configured store and standards catalog to
//! determine whether the service can actually read and write data before
//! it is relied on in the field.
//!
//! Use this after changing the GitHub coordinates, the cache location, or
//! the standards registry.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::Config;
use crate::standards::{StandardsCatalog, ALL_SOURCES};
use crate::store::cache::MeasurementCache;
use crate::store::remote::{RemoteSettings, RemoteStore};

// ============================================================================
// Verification Results
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub timestamp: String,
    pub remote: RemoteVerification,
    pub cache: CacheVerification,
    pub catalog: CatalogVerification,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteVerification {
    pub configured: bool,
    pub status: VerificationStatus,
    pub record_count: usize,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheVerification {
    pub path: String,
    pub present: bool,
    pub status: VerificationStatus,
    pub record_count: usize,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogVerification {
    pub status: VerificationStatus,
    pub entry_count: usize,
    pub duplicate_parameters: Vec<String>,
    pub nonpositive_limits: Vec<String>,
    pub incomplete_entries: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VerificationStatus {
    Success,
    PartialSuccess,
    Failed,
}

// ============================================================================
// Remote Verification
// ============================================================================

pub fn verify_remote(config: &Config, token: Option<String>) -> RemoteVerification {
    let mut result = RemoteVerification {
        configured: false,
        status: VerificationStatus::Failed,
        record_count: 0,
        error_message: None,
    };

    let Some(settings) = RemoteSettings::resolve(config, token) else {
        result.error_message =
            Some("GitHub owner, repository, or token not configured".to_string());
        return result;
    };
    result.configured = true;

    match RemoteStore::new(settings).and_then(|remote| remote.fetch()) {
        Ok(measurements) => {
            result.record_count = measurements.len();
            // An empty file is reachable but has nothing to serve yet
            result.status = if measurements.is_empty() {
                VerificationStatus::PartialSuccess
            } else {
                VerificationStatus::Success
            };
        }
        Err(e) => {
            result.error_message = Some(e.to_string());
        }
    }

    result
}

// ============================================================================
// Cache Verification
// ============================================================================

pub fn verify_cache(config: &Config) -> CacheVerification {
    let cache = MeasurementCache::new(&config.store.cache_path);
    let mut result = CacheVerification {
        path: config.store.cache_path.clone(),
        present: cache.exists(),
        status: VerificationStatus::Failed,
        record_count: 0,
        error_message: None,
    };

    if !result.present {
        result.status = VerificationStatus::PartialSuccess;
        result.error_message = Some("no cache file yet".to_string());
        return result;
    }

    match cache.load() {
        Some(measurements) => {
            result.record_count = measurements.len();
            result.status = VerificationStatus::Success;
        }
        None => {
            result.error_message = Some("cache file is unreadable or corrupt".to_string());
        }
    }

    result
}

// ============================================================================
// Catalog Verification
// ============================================================================

pub fn verify_catalog(catalog: &StandardsCatalog) -> CatalogVerification {
    let mut duplicate_parameters = Vec::new();
    let mut nonpositive_limits = Vec::new();
    let mut incomplete_entries = Vec::new();

    let mut seen = HashSet::new();
    for entry in catalog.entries() {
        if !seen.insert(entry.parameter) {
            duplicate_parameters.push(entry.parameter.to_string());
        }
        for (source, limit) in entry.thresholds {
            if *limit <= 0.0 {
                nonpositive_limits.push(format!("{}/{}", entry.parameter, source));
            }
        }
        let covered = ALL_SOURCES
            .iter()
            .all(|s| entry.thresholds.iter().any(|(name, _)| name == s));
        if !covered {
            incomplete_entries.push(entry.parameter.to_string());
        }
    }

    let status = if duplicate_parameters.is_empty()
        && nonpositive_limits.is_empty()
        && incomplete_entries.is_empty()
    {
        VerificationStatus::Success
    } else {
        VerificationStatus::Failed
    };

    CatalogVerification {
        status,
        entry_count: catalog.len(),
        duplicate_parameters,
        nonpositive_limits,
        incomplete_entries,
    }
}

// ============================================================================
// Full Verification Runner
// ============================================================================

pub fn run_full_verification(config: &Config, token: Option<String>) -> VerificationReport {
    println!("🔍 Verifying remote store...");
    let remote = verify_remote(config, token);
    match remote.status {
        VerificationStatus::Success => {
            println!("  ✓ OK ({} records)", remote.record_count)
        }
        VerificationStatus::PartialSuccess => {
            println!("  ⚠ Reachable but empty")
        }
        VerificationStatus::Failed => println!(
            "  ✗ FAILED: {}",
            remote.error_message.as_deref().unwrap_or("Unknown")
        ),
    }

    println!("\n🔍 Verifying local cache...");
    let cache = verify_cache(config);
    match cache.status {
        VerificationStatus::Success => {
            println!("  ✓ OK ({} records)", cache.record_count)
        }
        VerificationStatus::PartialSuccess => println!("  ⚠ No cache file yet"),
        VerificationStatus::Failed => println!(
            "  ✗ FAILED: {}",
            cache.error_message.as_deref().unwrap_or("Unknown")
        ),
    }

    println!("\n🔍 Verifying standards catalog...");
    let catalog = verify_catalog(&StandardsCatalog::builtin());
    match catalog.status {
        VerificationStatus::Success => {
            println!("  ✓ OK ({} entries)", catalog.entry_count)
        }
        _ => println!(
            "  ✗ FAILED: {} duplicates, {} nonpositive limits, {} incomplete entries",
            catalog.duplicate_parameters.len(),
            catalog.nonpositive_limits.len(),
            catalog.incomplete_entries.len()
        ),
    }

    VerificationReport {
        timestamp: Utc::now().to_rfc3339(),
        remote,
        cache,
        catalog,
    }
}

pub fn print_summary(report: &VerificationReport) {
    println!("\n═══════════════════════════════════════════════════════════");
    println!("📊 VERIFICATION SUMMARY");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!(
        "Remote store:   {:?}{}",
        report.remote.status,
        if report.remote.configured { "" } else { " (not configured)" }
    );
    println!("Local cache:    {:?} ({})", report.cache.status, report.cache.path);
    println!(
        "Catalog:        {:?} ({} entries)",
        report.catalog.status, report.catalog.entry_count
    );
    println!("═══════════════════════════════════════════════════════════");
}

// ============================================================================
// Tests
// ============================================================================
