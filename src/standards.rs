/// Regulatory standards registry for the mining-impact monitoring service.
///
/// Defines the canonical table of monitored parameters, their units and
/// categories, and the numeric limits published by each standards body.
/// This is the single source of truth for parameter names — all other
/// modules should reference parameters from here rather than hardcoding
/// strings.
///
/// The table is wrapped by [`StandardsCatalog`], a read-only lookup object
/// built once at process start and passed explicitly into the evaluation
/// engine. Nothing mutates it at runtime.

use std::collections::HashMap;

use crate::model::MeasurementType;

// ---------------------------------------------------------------------------
// Standards sources
// ---------------------------------------------------------------------------

/// World Health Organization guideline values.
pub const SOURCE_WHO: &str = "WHO";

/// African regional framework limits.
pub const SOURCE_AFC: &str = "AFC";

/// Senegalese national regulation limits.
pub const SOURCE_SENEGAL: &str = "Senegal";

/// Every standards body the registry is expected to cover, in the order
/// results are reported.
pub const ALL_SOURCES: &[&str] = &[SOURCE_WHO, SOURCE_AFC, SOURCE_SENEGAL];

// ---------------------------------------------------------------------------
// Registry entries
// ---------------------------------------------------------------------------

/// Regulatory limits for a single monitored parameter.
pub struct StandardEntry {
    /// Parameter name, unique across the registry.
    pub parameter: &'static str,
    /// Canonical unit for comparisons. Callers are responsible for
    /// recording measurements in this unit; limits are not converted.
    pub unit: &'static str,
    /// Physical category of the parameter.
    pub measurement_type: MeasurementType,
    /// Limits by standards source. A measured value strictly above a
    /// limit is an exceedance of that source.
    pub thresholds: &'static [(&'static str, f64)],
}

/// All parameters monitored in the mining-impact context, grouped by
/// category: water, then air, soil, waste, and noise.
///
/// Sources:
///   - WHO guideline values for drinking water and ambient air
///   - AFC regional framework limits
///   - Senegalese national environmental regulation
pub static STANDARDS_REGISTRY: &[StandardEntry] = &[
    // Water (mg/L)
    StandardEntry {
        parameter: "Arsenic",
        unit: "mg/L",
        measurement_type: MeasurementType::Water,
        thresholds: &[(SOURCE_WHO, 0.01), (SOURCE_AFC, 0.01), (SOURCE_SENEGAL, 0.01)],
    },
    StandardEntry {
        parameter: "Mercury",
        unit: "mg/L",
        measurement_type: MeasurementType::Water,
        thresholds: &[(SOURCE_WHO, 0.006), (SOURCE_AFC, 0.005), (SOURCE_SENEGAL, 0.006)],
    },
    StandardEntry {
        parameter: "Cyanide",
        unit: "mg/L",
        measurement_type: MeasurementType::Water,
        thresholds: &[(SOURCE_WHO, 0.07), (SOURCE_AFC, 0.07), (SOURCE_SENEGAL, 0.07)],
    },
    StandardEntry {
        parameter: "Lead",
        unit: "mg/L",
        measurement_type: MeasurementType::Water,
        thresholds: &[(SOURCE_WHO, 0.01), (SOURCE_AFC, 0.01), (SOURCE_SENEGAL, 0.01)],
    },
    StandardEntry {
        parameter: "Cadmium",
        unit: "mg/L",
        measurement_type: MeasurementType::Water,
        thresholds: &[(SOURCE_WHO, 0.003), (SOURCE_AFC, 0.003), (SOURCE_SENEGAL, 0.003)],
    },
    StandardEntry {
        parameter: "Chromium",
        unit: "mg/L",
        measurement_type: MeasurementType::Water,
        thresholds: &[(SOURCE_WHO, 0.05), (SOURCE_AFC, 0.05), (SOURCE_SENEGAL, 0.05)],
    },
    StandardEntry {
        parameter: "Nickel",
        unit: "mg/L",
        measurement_type: MeasurementType::Water,
        thresholds: &[(SOURCE_WHO, 0.07), (SOURCE_AFC, 0.07), (SOURCE_SENEGAL, 0.07)],
    },
    StandardEntry {
        parameter: "Zinc",
        unit: "mg/L",
        measurement_type: MeasurementType::Water,
        thresholds: &[(SOURCE_WHO, 3.0), (SOURCE_AFC, 3.0), (SOURCE_SENEGAL, 3.0)],
    },
    // Air (µg/m³ except CO)
    StandardEntry {
        parameter: "PM2.5",
        unit: "µg/m³",
        measurement_type: MeasurementType::Air,
        thresholds: &[(SOURCE_WHO, 25.0), (SOURCE_AFC, 25.0), (SOURCE_SENEGAL, 25.0)],
    },
    StandardEntry {
        parameter: "PM10",
        unit: "µg/m³",
        measurement_type: MeasurementType::Air,
        thresholds: &[(SOURCE_WHO, 50.0), (SOURCE_AFC, 50.0), (SOURCE_SENEGAL, 50.0)],
    },
    StandardEntry {
        parameter: "SO2",
        unit: "µg/m³",
        measurement_type: MeasurementType::Air,
        thresholds: &[(SOURCE_WHO, 20.0), (SOURCE_AFC, 20.0), (SOURCE_SENEGAL, 20.0)],
    },
    StandardEntry {
        parameter: "NO2",
        unit: "µg/m³",
        measurement_type: MeasurementType::Air,
        thresholds: &[(SOURCE_WHO, 40.0), (SOURCE_AFC, 40.0), (SOURCE_SENEGAL, 40.0)],
    },
    StandardEntry {
        parameter: "CO",
        unit: "mg/m³",
        measurement_type: MeasurementType::Air,
        thresholds: &[(SOURCE_WHO, 10.0), (SOURCE_AFC, 10.0), (SOURCE_SENEGAL, 10.0)],
    },
    StandardEntry {
        parameter: "O3",
        unit: "µg/m³",
        measurement_type: MeasurementType::Air,
        thresholds: &[(SOURCE_WHO, 100.0), (SOURCE_AFC, 100.0), (SOURCE_SENEGAL, 100.0)],
    },
    // Soil (mg/kg)
    StandardEntry {
        parameter: "Lead (soil)",
        unit: "mg/kg",
        measurement_type: MeasurementType::Soil,
        thresholds: &[(SOURCE_WHO, 70.0), (SOURCE_AFC, 70.0), (SOURCE_SENEGAL, 70.0)],
    },
    StandardEntry {
        parameter: "Cadmium (soil)",
        unit: "mg/kg",
        measurement_type: MeasurementType::Soil,
        thresholds: &[(SOURCE_WHO, 3.0), (SOURCE_AFC, 3.0), (SOURCE_SENEGAL, 3.0)],
    },
    StandardEntry {
        parameter: "Mercury (soil)",
        unit: "mg/kg",
        measurement_type: MeasurementType::Soil,
        thresholds: &[(SOURCE_WHO, 2.0), (SOURCE_AFC, 2.0), (SOURCE_SENEGAL, 2.0)],
    },
    StandardEntry {
        parameter: "Arsenic (soil)",
        unit: "mg/kg",
        measurement_type: MeasurementType::Soil,
        thresholds: &[(SOURCE_WHO, 20.0), (SOURCE_AFC, 20.0), (SOURCE_SENEGAL, 20.0)],
    },
    StandardEntry {
        parameter: "Chromium (soil)",
        unit: "mg/kg",
        measurement_type: MeasurementType::Soil,
        thresholds: &[(SOURCE_WHO, 100.0), (SOURCE_AFC, 100.0), (SOURCE_SENEGAL, 100.0)],
    },
    StandardEntry {
        parameter: "Nickel (soil)",
        unit: "mg/kg",
        measurement_type: MeasurementType::Soil,
        thresholds: &[(SOURCE_WHO, 50.0), (SOURCE_AFC, 50.0), (SOURCE_SENEGAL, 50.0)],
    },
    // Waste (mg/kg)
    StandardEntry {
        parameter: "Total hydrocarbons",
        unit: "mg/kg",
        measurement_type: MeasurementType::Waste,
        thresholds: &[(SOURCE_WHO, 500.0), (SOURCE_AFC, 500.0), (SOURCE_SENEGAL, 500.0)],
    },
    StandardEntry {
        parameter: "Total heavy metals",
        unit: "mg/kg",
        measurement_type: MeasurementType::Waste,
        thresholds: &[(SOURCE_WHO, 100.0), (SOURCE_AFC, 100.0), (SOURCE_SENEGAL, 100.0)],
    },
    StandardEntry {
        parameter: "PCB",
        unit: "mg/kg",
        measurement_type: MeasurementType::Waste,
        thresholds: &[(SOURCE_WHO, 0.1), (SOURCE_AFC, 0.1), (SOURCE_SENEGAL, 0.1)],
    },
    // Noise (dB(A))
    StandardEntry {
        parameter: "Noise (residential day)",
        unit: "dB(A)",
        measurement_type: MeasurementType::Noise,
        thresholds: &[(SOURCE_WHO, 55.0), (SOURCE_AFC, 55.0), (SOURCE_SENEGAL, 55.0)],
    },
    StandardEntry {
        parameter: "Noise (residential night)",
        unit: "dB(A)",
        measurement_type: MeasurementType::Noise,
        thresholds: &[(SOURCE_WHO, 45.0), (SOURCE_AFC, 45.0), (SOURCE_SENEGAL, 45.0)],
    },
    StandardEntry {
        parameter: "Noise (industrial zone)",
        unit: "dB(A)",
        measurement_type: MeasurementType::Noise,
        thresholds: &[(SOURCE_WHO, 70.0), (SOURCE_AFC, 70.0), (SOURCE_SENEGAL, 70.0)],
    },
    StandardEntry {
        parameter: "Noise (commercial zone)",
        unit: "dB(A)",
        measurement_type: MeasurementType::Noise,
        thresholds: &[(SOURCE_WHO, 65.0), (SOURCE_AFC, 65.0), (SOURCE_SENEGAL, 65.0)],
    },
];

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Read-only lookup over a standards table.
///
/// Constructed once at startup and handed to the evaluator/deriver by
/// reference. Lookup is O(1); absence of a parameter is not an error —
/// it means "no applicable standards, no alerts possible".
pub struct StandardsCatalog {
    entries: &'static [StandardEntry],
    index: HashMap<&'static str, usize>,
}

impl StandardsCatalog {
    /// Builds a catalog over an arbitrary entry table. The table must not
    /// contain duplicate parameter names (the builtin registry is
    /// test-enforced; a duplicate would shadow the earlier entry).
    pub fn new(entries: &'static [StandardEntry]) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.parameter, i))
            .collect();
        StandardsCatalog { entries, index }
    }

    /// Catalog over the builtin registry.
    pub fn builtin() -> Self {
        Self::new(STANDARDS_REGISTRY)
    }

    /// Looks up the standards entry for a parameter. Returns `None` if
    /// the parameter is not in the table.
    pub fn lookup(&self, parameter: &str) -> Option<&'static StandardEntry> {
        self.index.get(parameter).map(|&i| &self.entries[i])
    }

    /// All parameter names, in table order.
    pub fn parameters(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.parameter).collect()
    }

    /// Entries belonging to one measurement category, in table order.
    pub fn parameters_of_type(&self, kind: MeasurementType) -> Vec<&'static StandardEntry> {
        self.entries
            .iter()
            .filter(|e| e.measurement_type == kind)
            .collect()
    }

    /// The distinct categories present in the table, in first-seen order.
    pub fn all_types(&self) -> Vec<MeasurementType> {
        let mut types = Vec::new();
        for entry in self.entries {
            if !types.contains(&entry.measurement_type) {
                types.push(entry.measurement_type);
            }
        }
        types
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the underlying entries in table order.
    pub fn entries(&self) -> impl Iterator<Item = &'static StandardEntry> + '_ {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
