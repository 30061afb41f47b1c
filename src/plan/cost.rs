//! Cost model: marginal cost and current capacity per plant.

use super::error::CostError;
use super::types::{FuelPrices, PlantSpec, PlantType};

/// Tons of CO2 emitted per MWh generated by a fuel-burning plant.
pub const DEFAULT_CO2_FACTOR: f64 = 0.3;

/// A plant together with its derived cost figures.
///
/// Built once per request from the untouched [`PlantSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct CostedPlant {
    /// Limits as supplied by the request.
    pub spec: PlantSpec,
    /// Wind-limited output for wind plants, 0 for fuel plants
    /// (their output is chosen during dispatch).
    pub capacity: f64,
    /// Cost per MWh produced (€/MWh).
    pub marginal_cost: f64,
}

impl CostedPlant {
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn is_wind(&self) -> bool {
        self.spec.plant_type == PlantType::WindTurbine
    }

    /// Output range `(pmin, pmax)` explored by the dispatch search.
    ///
    /// Wind plants have no controllable range: they run at their current
    /// capacity or not at all.
    pub fn dispatch_range(&self) -> (f64, f64) {
        if self.is_wind() {
            (self.capacity, self.capacity)
        } else {
            (self.spec.pmin, self.spec.pmax)
        }
    }
}

/// Derives capacity and marginal cost for every plant, in request order.
///
/// # Arguments
///
/// * `plants` - Plant roster from the request
/// * `fuels` - Fuel prices and wind availability
/// * `co2_factor` - Tons of CO2 per MWh for fuel-burning plants
///
/// # Errors
///
/// Returns a [`CostError`] for the first plant whose cost cannot be derived.
pub fn costed_plants(
    plants: &[PlantSpec],
    fuels: &FuelPrices,
    co2_factor: f64,
) -> Result<Vec<CostedPlant>, CostError> {
    plants
        .iter()
        .map(|plant| costed_plant(plant, fuels, co2_factor))
        .collect()
}

/// Derives capacity and marginal cost for a single plant.
///
/// # Errors
///
/// Returns a [`CostError`] if a fuel plant has a non-positive efficiency or
/// a derived value is not finite.
pub fn costed_plant(
    spec: &PlantSpec,
    fuels: &FuelPrices,
    co2_factor: f64,
) -> Result<CostedPlant, CostError> {
    let emission_cost = co2_factor * fuels.co2_euro_per_ton;

    let (capacity, marginal_cost) = match spec.plant_type {
        PlantType::WindTurbine => (spec.pmax * fuels.wind_pct / 100.0, 0.0),
        PlantType::GasFired => (
            0.0,
            fuel_cost_per_mwh(spec, fuels.gas_euro_per_mwh)? + emission_cost,
        ),
        PlantType::TurboJet => (
            0.0,
            fuel_cost_per_mwh(spec, fuels.kerosine_euro_per_mwh)? + emission_cost,
        ),
        PlantType::Unknown => (0.0, emission_cost),
    };

    if !capacity.is_finite() {
        return Err(CostError::NonFinite {
            plant: spec.name.clone(),
            field: "capacity",
        });
    }
    if !marginal_cost.is_finite() {
        return Err(CostError::NonFinite {
            plant: spec.name.clone(),
            field: "marginal cost",
        });
    }

    Ok(CostedPlant {
        spec: spec.clone(),
        capacity,
        marginal_cost,
    })
}

fn fuel_cost_per_mwh(spec: &PlantSpec, price_per_mwh: f64) -> Result<f64, CostError> {
    if !(spec.efficiency > 0.0) {
        return Err(CostError::InvalidEfficiency {
            plant: spec.name.clone(),
            efficiency: spec.efficiency,
        });
    }
    Ok(price_per_mwh / spec.efficiency)
}
