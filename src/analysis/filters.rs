//! Pure measurement filtering.
//!
//! Consumers (reports, exports) narrow the collection by category,
//! parameter, and capture period. Filtering never mutates the input and
//! holds no state.

use chrono::{DateTime, Utc};

use crate::model::{Measurement, MeasurementType};

/// Criteria for narrowing a measurement collection. `None` matches
/// everything for that field; the period is inclusive at both ends.
#[derive(Debug, Clone, Default)]
pub struct MeasurementFilter {
    pub measurement_type: Option<MeasurementType>,
    pub parameter: Option<String>,
    pub period: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl MeasurementFilter {
    pub fn matches(&self, measurement: &Measurement) -> bool {
        if let Some(kind) = self.measurement_type {
            if measurement.measurement_type != kind {
                return false;
            }
        }
        if let Some(parameter) = &self.parameter {
            if &measurement.parameter != parameter {
                return false;
            }
        }
        if let Some((start, end)) = self.period {
            if measurement.timestamp < start || measurement.timestamp > end {
                return false;
            }
        }
        true
    }
}

/// Pure filter over a measurement collection.
pub fn filter_measurements(
    measurements: &[Measurement],
    filter: &MeasurementFilter,
) -> Vec<Measurement> {
    measurements
        .iter()
        .filter(|m| filter.matches(m))
        .cloned()
        .collect()
}
