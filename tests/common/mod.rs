//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use plant_dispatch::plan::types::{DispatchRequest, FuelPrices, PlantSpec, PlantType};

/// Reference fuel prices (13.4 gas, 50.8 kerosine, 20 CO2) at the given wind percentage.
pub fn fuels(wind_pct: f64) -> FuelPrices {
    FuelPrices {
        gas_euro_per_mwh: 13.4,
        kerosine_euro_per_mwh: 50.8,
        co2_euro_per_ton: 20.0,
        wind_pct,
    }
}

pub fn plant(name: &str, plant_type: PlantType, efficiency: f64, pmin: f64, pmax: f64) -> PlantSpec {
    PlantSpec {
        name: name.to_string(),
        plant_type,
        efficiency,
        pmin,
        pmax,
    }
}

/// Reference six-plant roster: two large CCGTs, a smaller gas unit, a
/// turbojet and two wind parks.
pub fn reference_roster() -> Vec<PlantSpec> {
    vec![
        plant("gasfiredbig1", PlantType::GasFired, 0.53, 100.0, 460.0),
        plant("gasfiredbig2", PlantType::GasFired, 0.53, 100.0, 460.0),
        plant("gasfiredsomewhatsmaller", PlantType::GasFired, 0.37, 40.0, 210.0),
        plant("tj1", PlantType::TurboJet, 0.3, 0.0, 16.0),
        plant("windpark1", PlantType::WindTurbine, 1.0, 0.0, 150.0),
        plant("windpark2", PlantType::WindTurbine, 1.0, 0.0, 36.0),
    ]
}

/// Reference roster request for the given load and wind percentage.
pub fn reference_request(total_load: f64, wind_pct: f64) -> DispatchRequest {
    DispatchRequest {
        total_load,
        fuels: fuels(wind_pct),
        powerplants: reference_roster(),
    }
}

/// Reads a file under `demos/payloads/`.
pub fn read_payload(file: &str) -> String {
    let path = format!("{}/demos/payloads/{file}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {path}: {e}"))
}
