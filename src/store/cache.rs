/// Local JSON cache for the measurement collection.
///
/// The cache is the fast read path: the store consults it before going to
/// the remote file, and rewrites it after every successful remote
/// operation. It never becomes a source of truth on its own — a corrupt
/// or missing cache simply falls through to the remote.

use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::{self, DataSource};
use crate::model::{EcomonError, Measurement};

pub struct MeasurementCache {
    path: PathBuf,
}

impl MeasurementCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        MeasurementCache { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the cached collection. `Some` for a valid cache file (even
    /// an empty collection); `None` when the file is missing or corrupt.
    /// Corruption is logged and treated as absence.
    pub fn load(&self) -> Option<Vec<Measurement>> {
        let text = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&text) {
            Ok(measurements) => Some(measurements),
            Err(e) => {
                logging::warn(
                    DataSource::Cache,
                    self.path.to_str(),
                    &format!("discarding corrupt cache: {}", e),
                );
                None
            }
        }
    }

    /// Writes the full collection, creating parent directories as needed.
    pub fn save(&self, measurements: &[Measurement]) -> Result<(), EcomonError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| EcomonError::Io(e.to_string()))?;
            }
        }
        let json = serde_json::to_string_pretty(measurements)
            .map_err(|e| EcomonError::ParseError(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| EcomonError::Io(e.to_string()))
    }

    /// Removes the cache file if present.
    pub fn clear(&self) -> Result<(), EcomonError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| EcomonError::Io(e.to_string()))?;
        }
        Ok(())
    }
}
