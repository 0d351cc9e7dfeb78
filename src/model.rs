/// Core data types for the mining-impact environmental monitoring service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains the measurement record, its pre-append shape, the measurement
/// categories, and the crate error type — no I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Measurement categories
// ---------------------------------------------------------------------------

/// Physical category of a measured parameter.
///
/// Every entry in the standards registry declares one of these, and every
/// measurement carries the category of its parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementType {
    Water,
    Air,
    Soil,
    Waste,
    Noise,
}

impl MeasurementType {
    /// Parses a category from user or import input. Case-insensitive.
    /// Returns `None` for anything outside the five known categories.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "water" => Some(MeasurementType::Water),
            "air" => Some(MeasurementType::Air),
            "soil" => Some(MeasurementType::Soil),
            "waste" => Some(MeasurementType::Waste),
            "noise" => Some(MeasurementType::Noise),
            _ => None,
        }
    }
}

impl std::fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasurementType::Water => write!(f, "Water"),
            MeasurementType::Air => write!(f, "Air"),
            MeasurementType::Soil => write!(f, "Soil"),
            MeasurementType::Waste => write!(f, "Waste"),
            MeasurementType::Noise => write!(f, "Noise"),
        }
    }
}

// ---------------------------------------------------------------------------
// Measurement types
// ---------------------------------------------------------------------------

/// A single field measurement, immutable once appended to the store.
///
/// This is the record shape persisted in the remote data file and the
/// local cache. `id` and `timestamp` are assigned by the store at append
/// time; everything else comes from the field user or an import file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: String,
    pub parameter: String,
    pub value: f64,
    pub unit: String,
    pub measurement_type: MeasurementType,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A measurement as captured before the store assigns identity.
///
/// Validation happens here, at construction time, so the evaluation
/// engine can assume every stored measurement is well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMeasurement {
    pub parameter: String,
    pub value: f64,
    pub unit: String,
    pub measurement_type: MeasurementType,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewMeasurement {
    /// Checks the mandatory-field invariant: parameter, value, unit,
    /// latitude, and longitude must all be present and well-formed.
    ///
    /// A failing measurement is rejected before it reaches the store —
    /// never silently coerced.
    pub fn validate(&self) -> Result<(), EcomonError> {
        if self.parameter.trim().is_empty() {
            return Err(EcomonError::MalformedMeasurement(
                "parameter is required".to_string(),
            ));
        }
        if self.unit.trim().is_empty() {
            return Err(EcomonError::MalformedMeasurement(
                "unit is required".to_string(),
            ));
        }
        if !self.value.is_finite() {
            return Err(EcomonError::MalformedMeasurement(format!(
                "value must be a finite number, got {}",
                self.value
            )));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(EcomonError::MalformedMeasurement(format!(
                "latitude {} outside [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(EcomonError::MalformedMeasurement(format!(
                "longitude {} outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Promotes this record to a stored measurement with the given
    /// identity and capture time.
    pub fn into_measurement(self, id: String, timestamp: DateTime<Utc>) -> Measurement {
        Measurement {
            id,
            parameter: self.parameter,
            value: self.value,
            unit: self.unit,
            measurement_type: self.measurement_type,
            timestamp,
            latitude: self.latitude,
            longitude: self.longitude,
            label: self.label,
            description: self.description,
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise across the measurement store, import pipeline,
/// and threshold evaluation.
///
/// `UnknownParameter` and `ZeroThreshold` describe degraded-but-normal
/// evaluation conditions: the evaluator logs them and carries on rather
/// than failing the batch. The remaining kinds are surfaced to callers.
#[derive(Debug, PartialEq)]
pub enum EcomonError {
    /// A measurement references a parameter with no standards entry.
    /// Not fatal — the measurement simply yields no alerts.
    UnknownParameter(String),
    /// A standards source declares a zero limit; the exceedance ratio is
    /// undefined for that source only. Sibling sources still evaluate.
    ZeroThreshold { parameter: String, source: String },
    /// Missing mandatory field or non-numeric value. Rejected before the
    /// measurement enters the store, with a human-readable reason.
    MalformedMeasurement(String),
    /// Non-2xx HTTP response from the remote file-hosting API.
    HttpError(u16),
    /// A response body or data file could not be deserialized.
    ParseError(String),
    /// The remote store is not configured or not reachable while the
    /// store is in require-remote mode.
    RemoteUnavailable(String),
    /// Local filesystem failure (cache file, export target, config file).
    Io(String),
}

impl std::fmt::Display for EcomonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EcomonError::UnknownParameter(parameter) => {
                write!(f, "No standards entry for parameter: {}", parameter)
            }
            EcomonError::ZeroThreshold { parameter, source } => {
                write!(f, "Zero threshold for {} from {}", parameter, source)
            }
            EcomonError::MalformedMeasurement(reason) => {
                write!(f, "Malformed measurement: {}", reason)
            }
            EcomonError::HttpError(code) => write!(f, "HTTP error: {}", code),
            EcomonError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            EcomonError::RemoteUnavailable(msg) => {
                write!(f, "Remote store unavailable: {}", msg)
            }
            EcomonError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for EcomonError {}
