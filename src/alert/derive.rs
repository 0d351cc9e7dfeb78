//! Alert derivation.
//!
//! Alerts are a pure function of the measurement collection and the
//! standards catalog. Nothing here holds state between calls: every query
//! recomputes the alert set from the measurements it is handed, so two
//! calls over the same collection always return identical sets. Any
//! cached alert list a collaborator keeps is a derived view that must be
//! invalidated whenever the measurements change — it is never a second
//! source of truth.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::alert::thresholds::{evaluate, Severity};
use crate::model::Measurement;
use crate::standards::StandardsCatalog;

// ---------------------------------------------------------------------------
// Alert
// ---------------------------------------------------------------------------

/// A threshold violation, identified by `(measurement_id, source)`.
///
/// Carries a snapshot of the triggering measurement so consumers (report
/// tables, exports) need no join back to the store. Never created,
/// mutated, or deleted independently — only derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    /// Rendered identity, `"{measurement_id}_{source}"`.
    pub id: String,
    pub measurement_id: String,
    pub parameter: String,
    pub value: f64,
    pub unit: String,
    /// Standards source whose limit was violated.
    pub source: String,
    /// The limit that was violated.
    pub limit: f64,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Derives the alerts for a single measurement.
///
/// One alert per source whose limit the value strictly exceeds. A result
/// in the compliant band (ratio below 1.5) that still exceeds its limit
/// produces an alert of severity `Compliant` — near-threshold, but a
/// violation nonetheless. Non-exceeding results produce nothing.
pub fn derive_for(measurement: &Measurement, catalog: &StandardsCatalog) -> Vec<Alert> {
    evaluate(measurement, catalog)
        .into_values()
        .filter(|r| r.exceeded)
        .map(|r| Alert {
            id: format!("{}_{}", measurement.id, r.source),
            measurement_id: measurement.id.clone(),
            parameter: measurement.parameter.clone(),
            value: measurement.value,
            unit: measurement.unit.clone(),
            source: r.source.to_string(),
            limit: r.limit,
            severity: r.severity,
            timestamp: measurement.timestamp,
            latitude: measurement.latitude,
            longitude: measurement.longitude,
        })
        .collect()
}

/// Derives the complete alert set for a measurement collection.
///
/// Deterministic: same input, same output, regardless of prior calls.
/// Output order follows the input measurement order (sources in
/// alphabetical order within a measurement); permuting the input permutes
/// the output correspondingly without changing its content.
pub fn derive_all(measurements: &[Measurement], catalog: &StandardsCatalog) -> Vec<Alert> {
    measurements
        .iter()
        .flat_map(|m| derive_for(m, catalog))
        .collect()
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Criteria for narrowing a derived alert set. `None` matches everything
/// for that field.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub parameter: Option<String>,
    pub severity: Option<Severity>,
    pub source: Option<String>,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        if let Some(parameter) = &self.parameter {
            if &alert.parameter != parameter {
                return false;
            }
        }
        if let Some(severity) = self.severity {
            if alert.severity != severity {
                return false;
            }
        }
        if let Some(source) = &self.source {
            if &alert.source != source {
                return false;
            }
        }
        true
    }
}

/// Pure filter over a derived alert set. The input is untouched.
pub fn filter_alerts(alerts: &[Alert], filter: &AlertFilter) -> Vec<Alert> {
    alerts.iter().filter(|a| filter.matches(a)).cloned().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MeasurementType;
    use crate::standards::{SOURCE_AFC, SOURCE_WHO};
    use chrono::TimeZone;

    fn measurement(id: &str, parameter: &str, value: f64, unit: &str) -> Measurement {
        Measurement {
            id: id.to_string(),
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

    #[test]
    fn test_compliant_measurement_yields_no_alerts() {
        let catalog = StandardsCatalog::builtin();
        let m = measurement("100", "Arsenic", 0.008, "mg/L");
        assert!(derive_for(&m, &catalog).is_empty());
    }

    #[test]
    fn test_critical_exceedance_yields_one_alert_per_source() {
        let catalog = StandardsCatalog::builtin();
        let m = measurement("100", "Arsenic", 0.025, "mg/L");
        let alerts = derive_for(&m, &catalog);

        assert_eq!(alerts.len(), 3);
        for alert in &alerts {
            assert_eq!(alert.severity, Severity::Critical);
            assert_eq!(alert.measurement_id, "100");
            assert_eq!(alert.limit, 0.01);
            assert_eq!(alert.id, format!("100_{}", alert.source));
        }
    }

    #[test]
    fn test_near_threshold_exceedance_still_alerts_at_compliant_severity() {
        // 35/25 = 1.4: exceeded, but below the warning band.
        let catalog = StandardsCatalog::builtin();
        let m = measurement("100", "PM2.5", 35.0, "µg/m³");
        let alerts = derive_for(&m, &catalog);

        assert_eq!(alerts.len(), 3);
        assert!(alerts.iter().all(|a| a.severity == Severity::Compliant));
    }

    #[test]
    fn test_warning_band() {
        // 40/25 = 1.6.
        let catalog = StandardsCatalog::builtin();
        let m = measurement("100", "PM2.5", 40.0, "µg/m³");
        let alerts = derive_for(&m, &catalog);
        assert!(alerts.iter().all(|a| a.severity == Severity::Warning));
    }

    #[test]
    fn test_unknown_parameter_yields_no_alerts() {
        let catalog = StandardsCatalog::builtin();
        let m = measurement("100", "Unobtainium", 1.0e6, "mg/L");
        assert!(derive_for(&m, &catalog).is_empty());
    }

    #[test]
    fn test_derive_all_is_idempotent() {
        let catalog = StandardsCatalog::builtin();
        let measurements = vec![
            measurement("1", "Arsenic", 0.025, "mg/L"),
            measurement("2", "PM2.5", 20.0, "µg/m³"),
            measurement("3", "Mercury", 0.0055, "mg/L"),
        ];

        let first = derive_all(&measurements, &catalog);
        let second = derive_all(&measurements, &catalog);
        assert_eq!(first, second, "repeated derivation must be bit-identical");
    }

    #[test]
    fn test_derive_all_is_order_independent_as_a_set() {
        let catalog = StandardsCatalog::builtin();
        let forward = vec![
            measurement("1", "Arsenic", 0.025, "mg/L"),
            measurement("2", "PM2.5", 35.0, "µg/m³"),
        ];
        let reversed: Vec<Measurement> = forward.iter().rev().cloned().collect();

        let mut a: Vec<String> = derive_all(&forward, &catalog).into_iter().map(|x| x.id).collect();
        let mut b: Vec<String> = derive_all(&reversed, &catalog).into_iter().map(|x| x.id).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn test_filter_by_severity_and_source() {
        let catalog = StandardsCatalog::builtin();
        let measurements = vec![
            measurement("1", "Arsenic", 0.025, "mg/L"),  // critical ×3
            measurement("2", "PM2.5", 35.0, "µg/m³"),    // compliant ×3
            measurement("3", "Mercury", 0.0055, "mg/L"), // AFC only
        ];
        let alerts = derive_all(&measurements, &catalog);

        let critical = filter_alerts(
            &alerts,
            &AlertFilter { severity: Some(Severity::Critical), ..Default::default() },
        );
        assert_eq!(critical.len(), 3);
        assert!(critical.iter().all(|a| a.parameter == "Arsenic"));

        let afc = filter_alerts(
            &alerts,
            &AlertFilter { source: Some(SOURCE_AFC.to_string()), ..Default::default() },
        );
        assert_eq!(afc.len(), 3);

        let who_mercury = filter_alerts(
            &alerts,
            &AlertFilter {
                parameter: Some("Mercury".to_string()),
                source: Some(SOURCE_WHO.to_string()),
                ..Default::default()
            },
        );
        assert!(who_mercury.is_empty(), "Mercury at 0.0055 only exceeds the AFC limit");
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let catalog = StandardsCatalog::builtin();
        let measurements = vec![measurement("1", "Arsenic", 0.025, "mg/L")];
        let alerts = derive_all(&measurements, &catalog);
        assert_eq!(filter_alerts(&alerts, &AlertFilter::default()).len(), alerts.len());
    }
}
