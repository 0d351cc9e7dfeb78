/// Threshold evaluation and alert derivation for the monitoring service.
///
/// The alert set is derived data: a pure function of the measurement
/// collection and the standards catalog, recomputed on every query and
/// never stored or mutated on its own.
///
/// Submodules:
/// - `thresholds` — per-source exceedance evaluation and severity bands.
/// - `derive` — alert materialization and filtering.

pub mod derive;
pub mod thresholds;

pub use derive::{derive_all, derive_for, filter_alerts, Alert, AlertFilter};
pub use thresholds::{evaluate, ExceedanceResult, Severity};
