//! Alert derivation integration tests.
//!
//! Exercises the evaluation engine end to end through the public API:
//! severity banding, alert materialization, determinism, and the
//! degraded-but-normal conditions (unknown parameter, zero limit).

use chrono::{TimeZone, Utc};

use ecomon_service::alert::{
    derive_all, derive_for, evaluate, filter_alerts, Alert, AlertFilter, Severity,
};
use ecomon_service::model::{Measurement, MeasurementType};
use ecomon_service::standards::{StandardEntry, StandardsCatalog, SOURCE_AFC, SOURCE_SENEGAL, SOURCE_WHO};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

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

fn alert_ids(alerts: &[Alert]) -> Vec<String> {
    let mut ids: Vec<String> = alerts.iter().map(|a| a.id.clone()).collect();
    ids.sort();
    ids
}

// ---------------------------------------------------------------------------
// Severity bands over the derivation pipeline
// ---------------------------------------------------------------------------

#[test]
fn value_below_every_limit_derives_nothing() {
    let catalog = StandardsCatalog::builtin();
    let m = measurement("1", "PM2.5", 20.0, "µg/m³");
    assert!(derive_all(std::slice::from_ref(&m), &catalog).is_empty());
}

#[test]
fn value_above_twice_the_limit_is_critical() {
    let catalog = StandardsCatalog::builtin();
    let m = measurement("1", "Arsenic", 0.025, "mg/L");
    let alerts = derive_for(&m, &catalog);

    assert_eq!(alerts.len(), 3, "one alert per standards source");
    assert!(alerts.iter().all(|a| a.severity == Severity::Critical));
    for source in [SOURCE_WHO, SOURCE_AFC, SOURCE_SENEGAL] {
        assert!(
            alerts.iter().any(|a| a.source == source),
            "missing alert for {}",
            source
        );
    }
}

#[test]
fn value_in_warning_band_is_warning() {
    // 40 / 25 = 1.6, inside [1.5, 2.0).
    let catalog = StandardsCatalog::builtin();
    let m = measurement("1", "PM2.5", 40.0, "µg/m³");
    let alerts = derive_for(&m, &catalog);
    assert!(!alerts.is_empty());
    assert!(alerts.iter().all(|a| a.severity == Severity::Warning));
}

#[test]
fn near_threshold_exceedance_alerts_at_compliant_severity() {
    // 35 / 25 = 1.4: exceeded, severity label stays compliant.
    let catalog = StandardsCatalog::builtin();
    let m = measurement("1", "PM2.5", 35.0, "µg/m³");
    let alerts = derive_for(&m, &catalog);

    assert_eq!(alerts.len(), 3, "an exceedance below the warning band is still an alert");
    assert!(alerts.iter().all(|a| a.severity == Severity::Compliant));
}

#[test]
fn value_exactly_at_limit_is_not_an_alert() {
    // The exceedance comparison is strict: 25.0 > 25.0 is false.
    let catalog = StandardsCatalog::builtin();
    let m = measurement("1", "PM2.5", 25.0, "µg/m³");

    let results = evaluate(&m, &catalog);
    assert!(results.values().all(|r| !r.exceeded && r.ratio == 1.0));
    assert!(derive_for(&m, &catalog).is_empty());
}

#[test]
fn band_edges_land_exactly_on_their_severity() {
    let catalog = StandardsCatalog::builtin();

    // 37.5 / 25 = 1.5 exactly — the warning band is inclusive below.
    let warning_edge = measurement("1", "PM2.5", 37.5, "µg/m³");
    assert!(derive_for(&warning_edge, &catalog)
        .iter()
        .all(|a| a.severity == Severity::Warning));

    // 50 / 25 = 2.0 exactly — the critical band is inclusive below.
    let critical_edge = measurement("2", "PM2.5", 50.0, "µg/m³");
    assert!(derive_for(&critical_edge, &catalog)
        .iter()
        .all(|a| a.severity == Severity::Critical));
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn derivation_is_idempotent_across_calls() {
    let catalog = StandardsCatalog::builtin();
    let measurements = vec![
        measurement("1", "Arsenic", 0.025, "mg/L"),
        measurement("2", "PM2.5", 35.0, "µg/m³"),
        measurement("3", "Mercury", 0.0055, "mg/L"),
        measurement("4", "Zinc", 1.0, "mg/L"),
    ];

    let first = derive_all(&measurements, &catalog);
    for _ in 0..5 {
        assert_eq!(derive_all(&measurements, &catalog), first);
    }
}

#[test]
fn permuting_the_input_permutes_but_does_not_change_the_alert_set() {
    let catalog = StandardsCatalog::builtin();
    let forward = vec![
        measurement("1", "Arsenic", 0.025, "mg/L"),
        measurement("2", "PM2.5", 35.0, "µg/m³"),
        measurement("3", "Lead", 0.012, "mg/L"),
    ];
    let mut shuffled = forward.clone();
    shuffled.rotate_left(1);
    shuffled.swap(0, 1);

    let a = derive_all(&forward, &catalog);
    let b = derive_all(&shuffled, &catalog);
    assert_ne!(a, b, "ordering should differ for this permutation");
    assert_eq!(alert_ids(&a), alert_ids(&b), "content must be set-identical");
}

#[test]
fn derive_for_agrees_with_derive_all_on_a_single_append() {
    let catalog = StandardsCatalog::builtin();
    let existing = vec![measurement("1", "Arsenic", 0.025, "mg/L")];
    let appended = measurement("2", "PM2.5", 60.0, "µg/m³");

    let mut with_appended = existing.clone();
    with_appended.push(appended.clone());

    let incremental = derive_for(&appended, &catalog);
    let full = derive_all(&with_appended, &catalog);
    let new_in_full: Vec<Alert> = full
        .into_iter()
        .filter(|a| a.measurement_id == appended.id)
        .collect();
    assert_eq!(incremental, new_in_full);
}

// ---------------------------------------------------------------------------
// Degraded conditions
// ---------------------------------------------------------------------------

#[test]
fn unknown_parameter_yields_nothing_and_no_error() {
    let catalog = StandardsCatalog::builtin();
    let m = measurement("1", "Unobtainium", 1.0e9, "mg/L");

    assert!(evaluate(&m, &catalog).is_empty());
    assert!(derive_for(&m, &catalog).is_empty());
}

static ZERO_LIMIT_TABLE: &[StandardEntry] = &[StandardEntry {
    parameter: "Phantom",
    unit: "mg/L",
    measurement_type: MeasurementType::Water,
    thresholds: &[("WHO", 0.0), ("AFC", 0.01), ("Senegal", 0.01)],
}];

#[test]
fn zero_limit_source_is_dropped_without_poisoning_siblings() {
    let catalog = StandardsCatalog::new(ZERO_LIMIT_TABLE);
    let m = measurement("1", "Phantom", 0.03, "mg/L");

    let alerts = derive_for(&m, &catalog);
    assert_eq!(alerts.len(), 2, "the two well-formed sources still alert");
    assert!(alerts.iter().all(|a| a.source != "WHO"));
    assert!(alerts.iter().all(|a| a.severity == Severity::Critical));
}

// ---------------------------------------------------------------------------
// Alert contents and filtering
// ---------------------------------------------------------------------------

#[test]
fn alerts_snapshot_the_triggering_measurement() {
    let catalog = StandardsCatalog::builtin();
    let mut m = measurement("1741600000000", "Arsenic", 0.025, "mg/L");
    m.label = Some("Zone 3".to_string());
    let alerts = derive_for(&m, &catalog);

    for a in &alerts {
        assert_eq!(a.id, format!("1741600000000_{}", a.source));
        assert_eq!(a.measurement_id, m.id);
        assert_eq!(a.parameter, "Arsenic");
        assert_eq!(a.value, 0.025);
        assert_eq!(a.unit, "mg/L");
        assert_eq!(a.limit, 0.01);
        assert_eq!(a.timestamp, m.timestamp);
        assert_eq!(a.latitude, m.latitude);
        assert_eq!(a.longitude, m.longitude);
    }
}

#[test]
fn filtering_narrows_without_mutating() {
    let catalog = StandardsCatalog::builtin();
    let measurements = vec![
        measurement("1", "Arsenic", 0.025, "mg/L"),
        measurement("2", "PM2.5", 40.0, "µg/m³"),
        measurement("3", "Mercury", 0.0055, "mg/L"),
    ];
    let alerts = derive_all(&measurements, &catalog);
    let before = alerts.clone();

    let warnings = filter_alerts(
        &alerts,
        &AlertFilter {
            severity: Some(Severity::Warning),
            ..Default::default()
        },
    );
    assert!(warnings.iter().all(|a| a.severity == Severity::Warning));

    let afc_arsenic = filter_alerts(
        &alerts,
        &AlertFilter {
            parameter: Some("Arsenic".to_string()),
            source: Some(SOURCE_AFC.to_string()),
            ..Default::default()
        },
    );
    assert_eq!(afc_arsenic.len(), 1);

    assert_eq!(alerts, before, "filtering must not touch the derived set");
}
