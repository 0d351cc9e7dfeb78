/// Development mode utilities for working without live field data.
///
/// When no remote data file exists yet (fresh deployment, offline
/// development), this module seeds the store with a small demonstration
/// dataset: five survey zones around Dakar spanning the whole severity
/// range, so maps, reports, and alert views have something to show.

use chrono::{Duration, Utc};

use crate::model::{EcomonError, MeasurementType, NewMeasurement};
use crate::store::MeasurementStore;

fn demo(
    parameter: &str,
    value: f64,
    unit: &str,
    kind: MeasurementType,
    latitude: f64,
    longitude: f64,
) -> NewMeasurement {
    NewMeasurement {
        parameter: parameter.to_string(),
        value,
        unit: unit.to_string(),
        measurement_type: kind,
        latitude,
        longitude,
        label: None,
        description: None,
    }
}

/// The demonstration dataset, in capture order.
pub fn demo_measurements() -> Vec<NewMeasurement> {
    use MeasurementType::{Air, Noise, Water};

    vec![
        // Zone 1 - city center (compliant)
        demo("Arsenic", 0.008, "mg/L", Water, 14.6928, -17.4467),
        demo("PM2.5", 20.0, "µg/m³", Air, 14.6928, -17.4467),
        demo("Noise (residential day)", 50.0, "dB(A)", Noise, 14.6928, -17.4467),
        // Zone 2 - west (near-threshold exceedances)
        demo("Arsenic", 0.012, "mg/L", Water, 14.7000, -17.4500),
        demo("PM2.5", 35.0, "µg/m³", Air, 14.7000, -17.4500),
        demo("Lead", 0.012, "mg/L", Water, 14.7000, -17.4500),
        // Zone 3 - east (critical)
        demo("Arsenic", 0.025, "mg/L", Water, 14.6800, -17.4300),
        demo("PM2.5", 60.0, "µg/m³", Air, 14.6800, -17.4300),
        demo("Mercury", 0.010, "mg/L", Water, 14.6800, -17.4300),
        demo("Noise (residential day)", 75.0, "dB(A)", Noise, 14.6800, -17.4300),
        // Zone 4 - south (mixed)
        demo("Arsenic", 0.009, "mg/L", Water, 14.6700, -17.4400),
        demo("PM10", 45.0, "µg/m³", Air, 14.6700, -17.4400),
        demo("Cadmium", 0.004, "mg/L", Water, 14.6700, -17.4400),
        // Zone 5 - north (compliant)
        demo("Arsenic", 0.007, "mg/L", Water, 14.7100, -17.4600),
        demo("PM2.5", 18.0, "µg/m³", Air, 14.7100, -17.4600),
        demo("Noise (residential night)", 40.0, "dB(A)", Noise, 14.7100, -17.4600),
    ]
}

/// Seeds the demonstration dataset into an empty store. A store that
/// already holds measurements is left untouched. Timestamps are spread
/// one minute apart so the seeded history reads like a survey pass.
///
/// Returns the number of measurements seeded.
pub fn seed_if_empty(store: &mut MeasurementStore) -> Result<usize, EcomonError> {
    if !store.load()?.is_empty() {
        return Ok(0);
    }

    let dataset = demo_measurements();
    let base = Utc::now() - Duration::minutes(dataset.len() as i64);
    let mut seeded = 0;
    for (i, measurement) in dataset.into_iter().enumerate() {
        store.append_at(measurement, base + Duration::minutes(i as i64))?;
        seeded += 1;
    }
    Ok(seeded)
}
