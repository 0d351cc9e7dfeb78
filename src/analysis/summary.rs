//! Summary statistics over the measurement collection and its derived
//! alert set.
//!
//! These are the simple counts the monitoring report shows — nothing here
//! aggregates beyond per-measurement results. The clock is injected so
//! summaries stay deterministic in tests.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::alert::{Alert, Severity};
use crate::model::Measurement;

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitoringSummary {
    pub total_measurements: usize,
    /// Measurements with no warning-or-worse alert. A near-threshold
    /// exceedance (compliant-severity alert) does not disqualify.
    pub compliant_measurements: usize,
    pub critical_alerts: usize,
    pub warning_alerts: usize,
    pub unique_parameters: usize,
    pub measurement_types: usize,
    /// Distinct locations at 0.01° granularity (roughly 1 km).
    pub zones_covered: usize,
    /// Whole days since the most recent measurement; `None` for an empty
    /// collection.
    pub days_since_latest: Option<i64>,
}

/// Worst severity among a measurement's alerts; `Compliant` when it has
/// none.
pub fn overall_status<'a>(alerts: impl IntoIterator<Item = &'a Alert>) -> Severity {
    alerts
        .into_iter()
        .map(|a| a.severity)
        .max()
        .unwrap_or(Severity::Compliant)
}

/// Computes the summary counts at a given point in time.
pub fn summarize_at(
    measurements: &[Measurement],
    alerts: &[Alert],
    now: DateTime<Utc>,
) -> MonitoringSummary {
    let compliant_measurements = measurements
        .iter()
        .filter(|m| {
            !alerts.iter().any(|a| {
                a.measurement_id == m.id
                    && matches!(a.severity, Severity::Warning | Severity::Critical)
            })
        })
        .count();

    let unique_parameters = measurements
        .iter()
        .map(|m| m.parameter.as_str())
        .collect::<HashSet<_>>()
        .len();
    let measurement_types = measurements
        .iter()
        .map(|m| m.measurement_type)
        .collect::<HashSet<_>>()
        .len();
    let zones_covered = measurements
        .iter()
        .map(|m| format!("{:.2},{:.2}", m.latitude, m.longitude))
        .collect::<HashSet<_>>()
        .len();

    let days_since_latest = measurements
        .iter()
        .map(|m| m.timestamp)
        .max()
        .map(|latest| (now - latest).num_days());

    MonitoringSummary {
        total_measurements: measurements.len(),
        compliant_measurements,
        critical_alerts: alerts.iter().filter(|a| a.severity == Severity::Critical).count(),
        warning_alerts: alerts.iter().filter(|a| a.severity == Severity::Warning).count(),
        unique_parameters,
        measurement_types,
        zones_covered,
        days_since_latest,
    }
}

/// Console rendering of the summary.
pub fn print_summary(summary: &MonitoringSummary) {
    println!("\n═══════════════════════════════════════════════════════════");
    println!("📊 MONITORING SUMMARY");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!(
        "Measurements:   {} total, {} compliant",
        summary.total_measurements, summary.compliant_measurements
    );
    println!(
        "Alerts:         {} critical, {} warning",
        summary.critical_alerts, summary.warning_alerts
    );
    println!(
        "Coverage:       {} parameters, {} types, {} zones",
        summary.unique_parameters, summary.measurement_types, summary.zones_covered
    );
    match summary.days_since_latest {
        Some(days) => println!("Latest reading: {}d ago", days),
        None => println!("Latest reading: none"),
    }
    println!("═══════════════════════════════════════════════════════════");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
