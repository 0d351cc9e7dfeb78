/// Export formatting for measurements, alerts, and the monitoring report.
///
/// CSV and JSON exports carry the raw records; the HTML report is the
/// human-facing document with per-source compliance columns, summary
/// statistics, and an alert detail table. Everything here builds strings
/// from snapshots — the only I/O is the final [`write_export`].

use chrono::{DateTime, NaiveDate, Utc};
use std::fs;
use std::path::Path;

use crate::alert::{evaluate, Alert};
use crate::analysis::summary::{overall_status, summarize_at};
use crate::model::{EcomonError, Measurement};
use crate::standards::{StandardsCatalog, SOURCE_AFC, SOURCE_SENEGAL, SOURCE_WHO};

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Renders the measurement collection as CSV. Every field is quoted;
/// embedded quotes are doubled.
pub fn measurements_csv(measurements: &[Measurement]) -> String {
    let mut out = String::from(
        "id,parameter,value,unit,measurement_type,timestamp,latitude,longitude,label,description\n",
    );
    for m in measurements {
        let row = [
            m.id.clone(),
            m.parameter.clone(),
            m.value.to_string(),
            m.unit.clone(),
            m.measurement_type.to_string(),
            m.timestamp.to_rfc3339(),
            m.latitude.to_string(),
            m.longitude.to_string(),
            m.label.clone().unwrap_or_default(),
            m.description.clone().unwrap_or_default(),
        ];
        out.push_str(&csv_row(&row));
    }
    out
}

/// Renders a derived alert set as CSV.
pub fn alerts_csv(alerts: &[Alert]) -> String {
    let mut out = String::from(
        "id,measurement_id,parameter,value,unit,source,limit,severity,timestamp,latitude,longitude\n",
    );
    for a in alerts {
        let row = [
            a.id.clone(),
            a.measurement_id.clone(),
            a.parameter.clone(),
            a.value.to_string(),
            a.unit.clone(),
            a.source.clone(),
            a.limit.to_string(),
            a.severity.to_string(),
            a.timestamp.to_rfc3339(),
            a.latitude.to_string(),
            a.longitude.to_string(),
        ];
        out.push_str(&csv_row(&row));
    }
    out
}

fn csv_row(fields: &[String]) -> String {
    let mut line = fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

fn csv_field(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

pub fn measurements_json(measurements: &[Measurement]) -> Result<String, EcomonError> {
    serde_json::to_string_pretty(measurements).map_err(|e| EcomonError::ParseError(e.to_string()))
}

pub fn alerts_json(alerts: &[Alert]) -> Result<String, EcomonError> {
    serde_json::to_string_pretty(alerts).map_err(|e| EcomonError::ParseError(e.to_string()))
}

// ---------------------------------------------------------------------------
// HTML report
// ---------------------------------------------------------------------------

/// Builds the monitoring report: measurement summary with per-source
/// compliance columns, summary statistics, and alert detail.
pub fn html_report(
    measurements: &[Measurement],
    alerts: &[Alert],
    catalog: &StandardsCatalog,
    now: DateTime<Utc>,
) -> String {
    let mut html = String::from(
        "<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n\
         table { border-collapse: collapse; width: 100%; font-family: Arial, sans-serif; }\n\
         th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }\n\
         th { background-color: #1e3c72; color: white; font-weight: bold; }\n\
         .compliant { background-color: #d4edda; }\n\
         .warning { background-color: #fff3cd; }\n\
         .critical { background-color: #f8d7da; }\n\
         </style>\n</head>\n<body>\n",
    );

    html.push_str(&format!(
        "<h1>Environmental Monitoring Report - {}</h1>\n",
        now.format("%Y-%m-%d")
    ));

    // Measurement summary
    html.push_str(
        "<h2>Measurements</h2>\n<table>\n<tr>\
         <th>Parameter</th><th>Value</th><th>Unit</th><th>Type</th>\
         <th>Label</th><th>Description</th><th>Date</th>\
         <th>Latitude</th><th>Longitude</th><th>Status</th>\
         <th>WHO</th><th>AFC</th><th>Senegal</th></tr>\n",
    );
    for m in measurements {
        let results = evaluate(m, catalog);
        let status = overall_status(alerts.iter().filter(|a| a.measurement_id == m.id));
        let source_cell = |source: &str| match results.get(source) {
            Some(r) => format!("{} {}", if r.exceeded { "✗" } else { "✓" }, r.limit),
            None => "N/A".to_string(),
        };

        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{:.6}</td><td>{:.6}</td>\
             <td><strong>{}</strong></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            status,
            escape_html(&m.parameter),
            m.value,
            escape_html(&m.unit),
            m.measurement_type,
            escape_html(m.label.as_deref().unwrap_or("—")),
            escape_html(m.description.as_deref().unwrap_or("")),
            m.timestamp.format("%Y-%m-%d %H:%M"),
            m.latitude,
            m.longitude,
            status,
            source_cell(SOURCE_WHO),
            source_cell(SOURCE_AFC),
            source_cell(SOURCE_SENEGAL),
        ));
    }
    html.push_str("</table>\n");

    // Statistics
    let summary = summarize_at(measurements, alerts, now);
    html.push_str("<h2>Statistics</h2>\n<table>\n<tr><th>Metric</th><th>Value</th></tr>\n");
    let mut stat = |metric: &str, value: String| {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            metric, value
        ));
    };
    stat("Total measurements", summary.total_measurements.to_string());
    stat("Compliant measurements", summary.compliant_measurements.to_string());
    stat("Critical alerts", summary.critical_alerts.to_string());
    stat("Warning alerts", summary.warning_alerts.to_string());
    stat("Unique parameters", summary.unique_parameters.to_string());
    stat("Measurement types", summary.measurement_types.to_string());
    html.push_str("</table>\n");

    // Alert detail
    html.push_str(
        "<h2>Alerts</h2>\n<table>\n<tr>\
         <th>Parameter</th><th>Value</th><th>Unit</th><th>Source</th>\
         <th>Limit</th><th>Severity</th><th>Date</th><th>Label</th></tr>\n",
    );
    for a in alerts {
        let label = measurements
            .iter()
            .find(|m| m.id == a.measurement_id)
            .and_then(|m| m.label.as_deref())
            .unwrap_or("—");
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td><strong>{}</strong></td><td>{}</td><td>{}</td></tr>\n",
            a.severity,
            escape_html(&a.parameter),
            a.value,
            escape_html(&a.unit),
            escape_html(&a.source),
            a.limit,
            a.severity,
            a.timestamp.format("%Y-%m-%d %H:%M"),
            escape_html(label),
        ));
    }
    html.push_str("</table>\n");

    html.push_str(&format!(
        "<p><em>Report generated {}</em></p>\n</body>\n</html>\n",
        now.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Default export filename: `{prefix}_{YYYY-MM-DD}.{extension}`.
pub fn dated_filename(prefix: &str, extension: &str, date: NaiveDate) -> String {
    format!("{}_{}.{}", prefix, date.format("%Y-%m-%d"), extension)
}

pub fn write_export(path: &Path, content: &str) -> Result<(), EcomonError> {
    fs::write(path, content).map_err(|e| EcomonError::Io(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
