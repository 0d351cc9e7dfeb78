/// Measurement persistence for the monitoring service.
///
/// The measurement collection is append-only and lives in two places: a
/// remote JSON file behind a version-controlled file-hosting API (the
/// single source of truth) and a local JSON cache (the fast read path).
/// In `require_remote` mode a write that cannot reach the remote is
/// refused outright — every field device must see the same base, so a
/// silent local fork is worse than a failed append.
///
/// Submodules:
/// - `remote` — GitHub contents API client.
/// - `cache` — local JSON cache file.

pub mod cache;
pub mod remote;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::logging::{self, DataSource};
use crate::model::{EcomonError, Measurement, NewMeasurement};
use cache::MeasurementCache;
use remote::{RemoteSettings, RemoteStore};

// ---------------------------------------------------------------------------
// Store facade
// ---------------------------------------------------------------------------

pub struct MeasurementStore {
    remote: Option<RemoteStore>,
    cache: MeasurementCache,
    require_remote: bool,
    remote_available: bool,
}

impl MeasurementStore {
    /// Opens the store: resolves the remote from config + token, then
    /// probes it once to warm the cache. A failed probe leaves the store
    /// usable for reads from cache; appends are then governed by
    /// `require_remote`.
    pub fn open(config: &Config, token: Option<String>) -> Self {
        let cache = MeasurementCache::new(&config.store.cache_path);
        let remote = match RemoteSettings::resolve(config, token) {
            Some(settings) => match RemoteStore::new(settings) {
                Ok(remote) => Some(remote),
                Err(e) => {
                    logging::log_remote_failure("client construction", &e);
                    None
                }
            },
            None => None,
        };

        let mut store = MeasurementStore {
            remote,
            cache,
            require_remote: config.store.require_remote,
            remote_available: false,
        };
        store.refresh();
        store
    }

    /// A store with no remote, for offline development and tests.
    pub fn local_only(cache_path: &str) -> Self {
        MeasurementStore {
            remote: None,
            cache: MeasurementCache::new(cache_path),
            require_remote: false,
            remote_available: false,
        }
    }

    pub fn is_remote_configured(&self) -> bool {
        self.remote.is_some()
    }

    pub fn remote_available(&self) -> bool {
        self.remote_available
    }

    /// Re-reads the remote file into the cache. Returns the record count
    /// on success, `None` when no remote is configured or the fetch
    /// failed (logged, availability flag updated).
    pub fn refresh(&mut self) -> Option<usize> {
        let remote = self.remote.as_ref()?;
        match remote.fetch() {
            Ok(measurements) => {
                self.remote_available = true;
                if let Err(e) = self.cache.save(&measurements) {
                    logging::log_cache_failure(
                        &self.cache.path().display().to_string(),
                        "cache refresh",
                        &e,
                    );
                }
                Some(measurements.len())
            }
            Err(e) => {
                self.remote_available = false;
                logging::log_remote_failure("fetch", &e);
                None
            }
        }
    }

    /// Loads the measurement collection: cache first, then the remote.
    ///
    /// With `require_remote`, a remote failure with no cache surfaces as
    /// an error; otherwise the store degrades to an empty collection
    /// (absence of data is normal, transport failure is logged).
    pub fn load(&self) -> Result<Vec<Measurement>, EcomonError> {
        if let Some(cached) = self.cache.load() {
            return Ok(cached);
        }

        match &self.remote {
            Some(remote) => match remote.fetch() {
                Ok(measurements) => {
                    if let Err(e) = self.cache.save(&measurements) {
                        logging::log_cache_failure(
                            &self.cache.path().display().to_string(),
                            "cache fill",
                            &e,
                        );
                    }
                    Ok(measurements)
                }
                Err(e) if self.require_remote => Err(e),
                Err(e) => {
                    logging::log_remote_failure("load", &e);
                    Ok(Vec::new())
                }
            },
            None if self.require_remote => Err(EcomonError::RemoteUnavailable(
                "remote store not configured".to_string(),
            )),
            None => Ok(Vec::new()),
        }
    }

    /// Owned, immutable copy of the collection for the derivation engine.
    /// The engine must never observe a collection mid-update, so it is
    /// always handed its own snapshot.
    pub fn snapshot(&self) -> Result<Vec<Measurement>, EcomonError> {
        self.load()
    }

    /// Validates and appends a measurement, stamping it with the current
    /// time.
    pub fn append(&mut self, new: NewMeasurement) -> Result<Measurement, EcomonError> {
        self.append_at(new, Utc::now())
    }

    /// Clock-injected append. Remote-first: the commit must land before
    /// the cache is updated, and in `require_remote` mode a commit
    /// failure aborts the append entirely.
    pub fn append_at(
        &mut self,
        new: NewMeasurement,
        now: DateTime<Utc>,
    ) -> Result<Measurement, EcomonError> {
        new.validate()?;

        let mut all = self.load()?;
        let id = next_id(&all, now);
        let measurement = new.into_measurement(id, now);
        all.push(measurement.clone());

        match &self.remote {
            Some(remote) => match remote.commit(&all) {
                Ok(commit_sha) => {
                    self.remote_available = true;
                    logging::debug(
                        DataSource::GitHub,
                        Some(&measurement.id),
                        &format!("committed {} records ({})", all.len(), commit_sha),
                    );
                }
                Err(e) => {
                    self.remote_available = false;
                    logging::log_remote_failure("commit", &e);
                    if self.require_remote {
                        return Err(e);
                    }
                }
            },
            None if self.require_remote => {
                return Err(EcomonError::RemoteUnavailable(
                    "remote store not configured".to_string(),
                ));
            }
            None => {}
        }

        self.cache.save(&all)?;
        Ok(measurement)
    }
}

/// Epoch-millisecond identity, bumped past the collection maximum so
/// several appends inside one millisecond cannot alias.
fn next_id(existing: &[Measurement], now: DateTime<Utc>) -> String {
    let mut millis = now.timestamp_millis();
    if let Some(max) = existing.iter().filter_map(|m| m.id.parse::<i64>().ok()).max() {
        if millis <= max {
            millis = max + 1;
        }
    }
    millis.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
