/// JSON measurement import.
///
/// Accepts an array of measurement objects. Field tools disagree on
/// whether numeric fields arrive as numbers or numeric strings, so rows
/// are extracted from a generic `serde_json::Value` tree rather than a
/// rigid schema; the conversion step decides what is malformed.

use serde_json::Value;

use crate::ingest::MeasurementRecord;
use crate::model::EcomonError;

/// Parses a JSON array of measurement objects into raw rows.
pub fn parse_json(content: &str) -> Result<Vec<MeasurementRecord>, EcomonError> {
    let root: Value =
        serde_json::from_str(content).map_err(|e| EcomonError::ParseError(e.to_string()))?;
    let items = root.as_array().ok_or_else(|| {
        EcomonError::ParseError("expected a JSON array of measurements".to_string())
    })?;

    let records = items
        .iter()
        .map(|item| MeasurementRecord {
            parameter: text_field(item, "parameter"),
            value: text_field(item, "value"),
            unit: text_field(item, "unit"),
            measurement_type: first_text(item, &["measurement_type", "type"]),
            latitude: text_field(item, "latitude"),
            longitude: text_field(item, "longitude"),
            label: optional_text(item, "label"),
            description: optional_text(item, "description"),
        })
        .collect();

    Ok(records)
}

/// String or number, rendered as text. Anything else reads as absent.
fn text_field(item: &Value, key: &str) -> String {
    match item.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn first_text(item: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|k| text_field(item, k))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

fn optional_text(item: &Value, key: &str) -> Option<String> {
    let text = text_field(item, key);
    if text.is_empty() { None } else { Some(text) }
}
