/// CSV measurement import.
///
/// The header row maps column names to positions, so column order does
/// not matter and extra columns (ids, timestamps from an earlier export)
/// are ignored. Fields are comma-separated with optional double quotes;
/// quotes are stripped, embedded commas are not supported — matching the
/// export format.

use crate::ingest::MeasurementRecord;
use crate::model::EcomonError;

/// Parses CSV text into raw measurement rows.
///
/// Required columns: parameter, value, unit, measurement_type (or type),
/// latitude, longitude. Optional: label, description. A missing required
/// column fails the whole file; bad cell contents fail only their row,
/// later, during conversion.
pub fn parse_csv(content: &str) -> Result<Vec<MeasurementRecord>, EcomonError> {
    let mut lines = content.lines();
    let header_line = lines
        .next()
        .ok_or_else(|| EcomonError::ParseError("empty CSV file".to_string()))?;

    let headers: Vec<String> = header_line
        .split(',')
        .map(|h| clean_field(h).to_ascii_lowercase())
        .collect();
    let col = |name: &str| headers.iter().position(|h| h == name);
    let require = |name: &str| {
        col(name).ok_or_else(|| {
            EcomonError::ParseError(format!("missing required CSV column '{}'", name))
        })
    };

    let idx_parameter = require("parameter")?;
    let idx_value = require("value")?;
    let idx_unit = require("unit")?;
    let idx_type = col("measurement_type")
        .or_else(|| col("type"))
        .ok_or_else(|| {
            EcomonError::ParseError("missing required CSV column 'measurement_type'".to_string())
        })?;
    let idx_latitude = require("latitude")?;
    let idx_longitude = require("longitude")?;
    let idx_label = col("label");
    let idx_description = col("description");

    let mut records = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<String> = line.split(',').map(clean_field).collect();
        let cell = |i: usize| fields.get(i).cloned().unwrap_or_default();
        let optional = |i: Option<usize>| {
            i.and_then(|i| fields.get(i))
                .map(|s| s.to_string())
                .filter(|s| !s.is_empty())
        };

        records.push(MeasurementRecord {
            parameter: cell(idx_parameter),
            value: cell(idx_value),
            unit: cell(idx_unit),
            measurement_type: cell(idx_type),
            latitude: cell(idx_latitude),
            longitude: cell(idx_longitude),
            label: optional(idx_label),
            description: optional(idx_description),
        });
    }

    Ok(records)
}

fn clean_field(s: &str) -> String {
    s.trim().trim_matches('"').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_rows_by_header_position() {
        let csv = "parameter,value,unit,type,latitude,longitude\n\
                   Arsenic,0.025,mg/L,Water,14.6928,-17.4467\n\
                   PM2.5,35,µg/m³,Air,14.7000,-17.4500\n";
        let records = parse_csv(csv).expect("CSV should parse");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].parameter, "Arsenic");
        assert_eq!(records[0].value, "0.025");
        assert_eq!(records[1].measurement_type, "Air");
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let csv = "longitude,parameter,latitude,unit,value,measurement_type\n\
                   -17.4467,Arsenic,14.6928,mg/L,0.025,Water\n";
        let records = parse_csv(csv).expect("CSV should parse");
        assert_eq!(records[0].parameter, "Arsenic");
        assert_eq!(records[0].longitude, "-17.4467");
    }

    #[test]
    fn test_quoted_fields_are_stripped() {
        let csv = "parameter,value,unit,type,latitude,longitude,label\n\
                   \"Arsenic\",\"0.025\",\"mg/L\",\"Water\",\"14.6928\",\"-17.4467\",\"Zone 3\"\n";
        let records = parse_csv(csv).expect("CSV should parse");
        assert_eq!(records[0].parameter, "Arsenic");
        assert_eq!(records[0].label.as_deref(), Some("Zone 3"));
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let csv = "parameter,value,unit,type,latitude,longitude\n\
                   Arsenic,0.025,mg/L,Water,14.6928,-17.4467\n\
                   \n";
        assert_eq!(parse_csv(csv).expect("CSV should parse").len(), 1);
    }

    #[test]
    fn test_missing_required_column_fails_the_file() {
        let csv = "parameter,value,unit,type,latitude\nArsenic,0.025,mg/L,Water,14.6928\n";
        match parse_csv(csv) {
            Err(EcomonError::ParseError(reason)) => {
                assert!(reason.contains("longitude"), "reason was '{}'", reason)
            }
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_optional_cell_is_none() {
        let csv = "parameter,value,unit,type,latitude,longitude,label\n\
                   Arsenic,0.025,mg/L,Water,14.6928,-17.4467,\n";
        let records = parse_csv(csv).expect("CSV should parse");
        assert_eq!(records[0].label, None);
    }
}
