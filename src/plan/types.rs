//! Request and result types for one production-plan computation.
//!
//! Field names follow the `/productionplan` wire format so the same types
//! serve the CLI payload files and the HTTP API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fuel prices and wind availability for one dispatch request.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FuelPrices {
    /// Gas price (€/MWh).
    #[serde(rename = "gas(euro/MWh)")]
    pub gas_euro_per_mwh: f64,
    /// Kerosine price (€/MWh).
    #[serde(rename = "kerosine(euro/MWh)")]
    pub kerosine_euro_per_mwh: f64,
    /// CO2 emission allowance price (€/ton).
    #[serde(rename = "co2(euro/ton)")]
    pub co2_euro_per_ton: f64,
    /// Wind availability as a percentage (0–100).
    #[serde(rename = "wind(%)")]
    pub wind_pct: f64,
}

/// Generation technology of a plant.
///
/// Any type string the dispatcher does not know deserializes to
/// [`PlantType::Unknown`], which is costed on emissions alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PlantType {
    GasFired,
    TurboJet,
    WindTurbine,
    Unknown,
}

impl PlantType {
    /// Wire name of the plant type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GasFired => "gasfired",
            Self::TurboJet => "turbojet",
            Self::WindTurbine => "windturbine",
            Self::Unknown => "unknown",
        }
    }
}

impl From<String> for PlantType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "gasfired" => Self::GasFired,
            "turbojet" => Self::TurboJet,
            "windturbine" => Self::WindTurbine,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Technical limits of one plant as supplied by the request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlantSpec {
    /// Unique name within the request.
    pub name: String,
    /// Generation technology.
    #[serde(rename = "type")]
    pub plant_type: PlantType,
    /// Fuel-to-electricity conversion efficiency (unused for wind).
    pub efficiency: f64,
    /// Minimum output when running (MW).
    pub pmin: f64,
    /// Maximum output (MW).
    pub pmax: f64,
}

/// A complete dispatch request: load to cover, fuel prices and plant roster.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DispatchRequest {
    /// Load to be covered (MW).
    #[serde(rename = "load")]
    pub total_load: f64,
    /// Fuel prices and wind availability.
    pub fuels: FuelPrices,
    /// Plants in request order.
    pub powerplants: Vec<PlantSpec>,
}

/// Power assigned to a single plant.
///
/// Serialized as `{"name": ..., "p": ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlantOutput {
    /// Plant name.
    pub name: String,
    /// Assigned power (MW), rounded to two decimals.
    #[serde(rename = "p")]
    pub power: f64,
}
