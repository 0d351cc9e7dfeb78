/// Measurement file import for the monitoring service.
///
/// CSV and JSON files produced by field tools (or by this service's own
/// exports) are parsed into raw rows, converted with an explicit numeric
/// parse step, and appended through the store's validation one row at a
/// time. A bad row is rejected with a reason and counted; the rest of the
/// file still imports.
///
/// Submodules:
/// - `csv` — header-mapped CSV parsing.
/// - `json` — JSON array parsing.

pub mod csv;
pub mod json;

use std::fs;
use std::path::Path;

use crate::logging;
use crate::model::{EcomonError, MeasurementType, NewMeasurement};
use crate::store::MeasurementStore;

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// An imported row before numeric parsing and validation. All fields are
/// text; conversion decides what is malformed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementRecord {
    pub parameter: String,
    pub value: String,
    pub unit: String,
    pub measurement_type: String,
    pub latitude: String,
    pub longitude: String,
    pub label: Option<String>,
    pub description: Option<String>,
}

impl MeasurementRecord {
    /// Converts the raw row into the validated pre-append shape. Numeric
    /// fields parse explicitly; failures name the field and the
    /// offending text.
    pub fn into_new_measurement(self) -> Result<NewMeasurement, EcomonError> {
        let value = parse_f64("value", &self.value)?;
        let latitude = parse_f64("latitude", &self.latitude)?;
        let longitude = parse_f64("longitude", &self.longitude)?;
        let measurement_type = MeasurementType::parse(&self.measurement_type).ok_or_else(|| {
            EcomonError::MalformedMeasurement(format!(
                "unknown measurement type '{}'",
                self.measurement_type
            ))
        })?;

        let new = NewMeasurement {
            parameter: self.parameter.trim().to_string(),
            value,
            unit: self.unit.trim().to_string(),
            measurement_type,
            latitude,
            longitude,
            label: self.label,
            description: self.description,
        };
        new.validate()?;
        Ok(new)
    }
}

fn parse_f64(field: &str, text: &str) -> Result<f64, EcomonError> {
    text.trim().parse::<f64>().map_err(|_| {
        EcomonError::MalformedMeasurement(format!("non-numeric {} '{}'", field, text))
    })
}

// ---------------------------------------------------------------------------
// Import driver
// ---------------------------------------------------------------------------

/// Outcome of a file import.
#[derive(Debug)]
pub struct ImportOutcome {
    pub total: usize,
    pub added: usize,
    /// Rejected rows as (1-based data row number, reason).
    pub errors: Vec<(usize, EcomonError)>,
}

/// Imports a CSV or JSON measurement file through the store. The format
/// is chosen by file extension; anything else is unsupported.
pub fn import_file(
    store: &mut MeasurementStore,
    path: &Path,
) -> Result<ImportOutcome, EcomonError> {
    let content = fs::read_to_string(path).map_err(|e| EcomonError::Io(e.to_string()))?;
    let records = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => csv::parse_csv(&content)?,
        Some("json") => json::parse_json(&content)?,
        _ => {
            return Err(EcomonError::ParseError(
                "unsupported file format (expected .csv or .json)".to_string(),
            ));
        }
    };
    Ok(import_records(store, records))
}

/// Appends parsed rows one by one, collecting per-row failures so a bad
/// row cannot abort the rest of the file.
pub fn import_records(
    store: &mut MeasurementStore,
    records: Vec<MeasurementRecord>,
) -> ImportOutcome {
    let total = records.len();
    let mut added = 0;
    let mut errors = Vec::new();

    for (i, record) in records.into_iter().enumerate() {
        let row = i + 1;
        match record
            .into_new_measurement()
            .and_then(|new| store.append(new))
        {
            Ok(_) => added += 1,
            Err(e) => {
                logging::warn(
                    logging::DataSource::Import,
                    None,
                    &format!("row {} rejected: {}", row, e),
                );
                errors.push((row, e));
            }
        }
    }

    logging::log_import_summary(total, added, errors.len());
    ImportOutcome {
        total,
        added,
        errors,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
