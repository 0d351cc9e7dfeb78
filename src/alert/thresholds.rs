//! Threshold exceedance evaluation.
//!
//! Compares one measurement against every limit its parameter carries in
//! the standards catalog and grades each comparison into a severity band.
//! Everything here is a pure function of the measurement and the catalog;
//! alert materialization lives in [`crate::alert::derive`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::logging::{self, DataSource};
use crate::model::{EcomonError, Measurement};
use crate::standards::StandardsCatalog;

// ---------------------------------------------------------------------------
// Severity bands
// ---------------------------------------------------------------------------

/// Severity levels, in ascending order of severity.
///
/// Bands over the exceedance ratio `value / limit`:
///   ratio >= 2.0        → Critical
///   1.5 <= ratio < 2.0  → Warning
///   ratio < 1.5         → Compliant
/// Inclusive on the lower bound, exclusive on the upper; the bands never
/// overlap and cover the whole non-negative range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Compliant,
    Warning,
    Critical,
}

impl Severity {
    /// Classifies an exceedance ratio into its severity band.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 2.0 {
            Severity::Critical
        } else if ratio >= 1.5 {
            Severity::Warning
        } else {
            Severity::Compliant
        }
    }

    /// Parses a severity from user input (filter arguments, import
    /// files). Case-insensitive; returns `None` for unknown labels.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compliant" => Some(Severity::Compliant),
            "warning" => Some(Severity::Warning),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Compliant => write!(f, "compliant"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

// ---------------------------------------------------------------------------
// Exceedance evaluation
// ---------------------------------------------------------------------------

/// Outcome of comparing one measurement against one source's limit.
///
/// Derived data: computed on demand, never persisted standalone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceedanceResult {
    /// Standards source that provided the limit.
    pub source: &'static str,
    /// The limit used for the comparison.
    pub limit: f64,
    /// `value > limit`, strict. A value exactly at the limit does not
    /// exceed it.
    pub exceeded: bool,
    /// `value / limit`.
    pub ratio: f64,
    pub severity: Severity,
}

/// Evaluates one measurement against every applicable standards source.
///
/// Returns one [`ExceedanceResult`] per source, keyed by source name.
/// An unknown parameter yields an empty map — "not applicable", not a
/// failure. A source with a zero limit is skipped (the ratio would be
/// undefined) and logged; its siblings still evaluate, so a bad entry
/// can never take down the whole batch.
pub fn evaluate(
    measurement: &Measurement,
    catalog: &StandardsCatalog,
) -> BTreeMap<&'static str, ExceedanceResult> {
    let mut results = BTreeMap::new();

    let Some(entry) = catalog.lookup(&measurement.parameter) else {
        let condition = EcomonError::UnknownParameter(measurement.parameter.clone());
        logging::debug(DataSource::System, Some(&measurement.id), &condition.to_string());
        return results;
    };

    for &(source, limit) in entry.thresholds {
        if limit == 0.0 {
            let condition = EcomonError::ZeroThreshold {
                parameter: measurement.parameter.clone(),
                source: source.to_string(),
            };
            logging::warn(
                DataSource::System,
                Some(&measurement.id),
                &format!("{}, skipping source", condition),
            );
            continue;
        }
        let ratio = measurement.value / limit;
        results.insert(
            source,
            ExceedanceResult {
                source,
                limit,
                exceeded: measurement.value > limit,
                ratio,
                severity: Severity::from_ratio(ratio),
            },
        );
    }

    results
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MeasurementType;
    use crate::standards::{StandardEntry, SOURCE_AFC, SOURCE_SENEGAL, SOURCE_WHO};
    use chrono::{TimeZone, Utc};

    fn measurement(parameter: &str, value: f64, unit: &str) -> Measurement {
        Measurement {
            id: "1700000000000".to_string(),
            parameter: parameter.to_string(),
            value,
            unit: unit.to_string(),
            measurement_type: MeasurementType::Water,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap(),
            latitude: 14.6928,
            longitude: -17.4467,
            label: None,
            description: None,
        }
    }

    // --- Severity bands -----------------------------------------------------

    #[test]
    fn test_severity_band_boundaries() {
        // Lower bound of each band is inclusive, upper bound exclusive.
        assert_eq!(Severity::from_ratio(0.0), Severity::Compliant);
        assert_eq!(Severity::from_ratio(1.0), Severity::Compliant);
        assert_eq!(Severity::from_ratio(1.4999), Severity::Compliant);
        assert_eq!(Severity::from_ratio(1.5), Severity::Warning);
        assert_eq!(Severity::from_ratio(1.9999), Severity::Warning);
        assert_eq!(Severity::from_ratio(2.0), Severity::Critical);
        assert_eq!(Severity::from_ratio(250.0), Severity::Critical);
    }

    #[test]
    fn test_severity_ascending_order() {
        assert!(Severity::Compliant < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }

    #[test]
    fn test_severity_parse_round_trips_display() {
        for severity in [Severity::Compliant, Severity::Warning, Severity::Critical] {
            assert_eq!(Severity::parse(&severity.to_string()), Some(severity));
        }
        assert_eq!(Severity::parse("catastrophic"), None);
    }

    // --- Evaluation ---------------------------------------------------------

    #[test]
    fn test_arsenic_at_2_5x_is_critical_for_all_sources() {
        let catalog = StandardsCatalog::builtin();
        let m = measurement("Arsenic", 0.025, "mg/L");
        let results = evaluate(&m, &catalog);

        assert_eq!(results.len(), 3);
        for source in [SOURCE_WHO, SOURCE_AFC, SOURCE_SENEGAL] {
            let r = results.get(source).expect("all three sources should evaluate");
            assert_eq!(r.limit, 0.01);
            assert!(r.exceeded);
            assert!((r.ratio - 2.5).abs() < 1e-9, "ratio was {}", r.ratio);
            assert_eq!(r.severity, Severity::Critical);
        }
    }

    #[test]
    fn test_pm25_at_35_exceeds_but_stays_in_compliant_band() {
        // 35 / 25 = 1.4 — an exceedance, but below the warning band.
        let catalog = StandardsCatalog::builtin();
        let m = measurement("PM2.5", 35.0, "µg/m³");
        let results = evaluate(&m, &catalog);

        let who = results.get(SOURCE_WHO).expect("WHO should evaluate");
        assert!(who.exceeded);
        assert!((who.ratio - 1.4).abs() < 1e-9);
        assert_eq!(who.severity, Severity::Compliant);
    }

    #[test]
    fn test_pm25_at_20_does_not_exceed() {
        let catalog = StandardsCatalog::builtin();
        let m = measurement("PM2.5", 20.0, "µg/m³");
        let results = evaluate(&m, &catalog);

        for r in results.values() {
            assert!(!r.exceeded);
            assert_eq!(r.severity, Severity::Compliant);
        }
    }

    #[test]
    fn test_value_exactly_at_limit_is_not_exceeded() {
        // The comparison is strictly greater-than: value == limit means
        // ratio 1.0, no exceedance.
        let catalog = StandardsCatalog::builtin();
        let m = measurement("PM2.5", 25.0, "µg/m³");
        let results = evaluate(&m, &catalog);

        let who = results.get(SOURCE_WHO).expect("WHO should evaluate");
        assert!(
            !who.exceeded,
            "value equal to the limit must not count as an exceedance"
        );
        assert_eq!(who.ratio, 1.0);
        assert_eq!(who.severity, Severity::Compliant);
    }

    #[test]
    fn test_unknown_parameter_yields_empty_map() {
        let catalog = StandardsCatalog::builtin();
        let m = measurement("Unobtainium", 99.0, "mg/L");
        assert!(evaluate(&m, &catalog).is_empty());
    }

    #[test]
    fn test_mercury_uses_per_source_limits() {
        // AFC's mercury limit (0.005) is tighter than WHO/Senegal (0.006);
        // a value between the two exceeds AFC only.
        let catalog = StandardsCatalog::builtin();
        let m = measurement("Mercury", 0.0055, "mg/L");
        let results = evaluate(&m, &catalog);

        assert!(results.get(SOURCE_AFC).unwrap().exceeded);
        assert!(!results.get(SOURCE_WHO).unwrap().exceeded);
        assert!(!results.get(SOURCE_SENEGAL).unwrap().exceeded);
    }

    // --- Zero-limit handling ------------------------------------------------

    static ZERO_LIMIT_TABLE: &[StandardEntry] = &[StandardEntry {
        parameter: "Phantom",
        unit: "mg/L",
        measurement_type: MeasurementType::Water,
        thresholds: &[("WHO", 0.0), ("AFC", 0.01), ("Senegal", 0.02)],
    }];

    #[test]
    fn test_zero_limit_source_is_skipped_siblings_still_evaluate() {
        let catalog = StandardsCatalog::new(ZERO_LIMIT_TABLE);
        let m = measurement("Phantom", 0.05, "mg/L");
        let results = evaluate(&m, &catalog);

        assert!(
            !results.contains_key("WHO"),
            "zero-limit source must be omitted from the result map"
        );
        assert_eq!(results.len(), 2);
        assert!(results.get("AFC").unwrap().exceeded);
        assert!(results.get("Senegal").unwrap().exceeded);
    }
}
