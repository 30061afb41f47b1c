//! Production planner that chains cost model, ranking and dispatch.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::config::ModelConfig;

use super::cost::{CostedPlant, costed_plants};
use super::dispatch::dispatch;
use super::error::PlanError;
use super::merit::rank;
use super::summary::PlanSummary;
use super::types::{DispatchRequest, PlantOutput};

/// Runs the three-stage pipeline for one request at a time.
///
/// Holds only the immutable model parameters, so a single planner can be
/// shared across concurrent requests.
///
/// # Examples
///
/// ```
/// use plant_dispatch::config::ModelConfig;
/// use plant_dispatch::plan::planner::Planner;
/// use plant_dispatch::plan::types::{DispatchRequest, FuelPrices, PlantSpec, PlantType};
///
/// let request = DispatchRequest {
///     total_load: 100.0,
///     fuels: FuelPrices {
///         gas_euro_per_mwh: 13.4,
///         kerosine_euro_per_mwh: 50.8,
///         co2_euro_per_ton: 20.0,
///         wind_pct: 60.0,
///     },
///     powerplants: vec![PlantSpec {
///         name: "windpark1".to_string(),
///         plant_type: PlantType::WindTurbine,
///         efficiency: 1.0,
///         pmin: 0.0,
///         pmax: 100.0,
///     }],
/// };
///
/// let plan = Planner::new(ModelConfig::default()).plan(&request).unwrap();
/// assert_eq!(plan.outputs()[0].power, 60.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    model: ModelConfig,
}

impl Planner {
    pub fn new(model: ModelConfig) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    /// Computes the production plan for `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`PlanError`] naming the stage that failed; no partial plan
    /// is produced.
    pub fn plan(&self, request: &DispatchRequest) -> Result<ProductionPlan, PlanError> {
        let costed = costed_plants(&request.powerplants, &request.fuels, self.model.co2_factor)?;
        let merit_order = rank(costed)?;
        let outputs = dispatch(&merit_order, request.total_load, self.model.step_mw)?;

        let plan = ProductionPlan {
            total_load: request.total_load,
            merit_order,
            outputs,
        };

        let summary = plan.summary();
        if !summary.covers_load() {
            warn!(
                load = summary.total_load_mw,
                dispatched = summary.dispatched_mw,
                unmet = summary.unmet_load_mw,
                "load not fully covered"
            );
        }
        info!(
            plants = summary.plant_count,
            running = summary.running_plants,
            dispatched = summary.dispatched_mw,
            cost = summary.hourly_cost_eur,
            "production plan computed"
        );

        Ok(plan)
    }
}

/// Result of a planner run.
///
/// `merit_order` and `outputs` are index-aligned: `outputs[i]` is the power
/// assigned to `merit_order[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionPlan {
    /// Load the plan was computed for (MW).
    pub total_load: f64,
    /// Costed plants in dispatch priority.
    pub merit_order: Vec<CostedPlant>,
    /// Assigned power per plant, in merit order.
    pub outputs: Vec<PlantOutput>,
}

impl ProductionPlan {
    pub fn outputs(&self) -> &[PlantOutput] {
        &self.outputs
    }

    pub fn into_outputs(self) -> Vec<PlantOutput> {
        self.outputs
    }

    /// Re-maps the plan to the plant order of the original request.
    ///
    /// Plants missing from the plan report `0.0`.
    pub fn in_request_order(&self, request: &DispatchRequest) -> Vec<PlantOutput> {
        let by_name: HashMap<&str, f64> = self
            .outputs
            .iter()
            .map(|o| (o.name.as_str(), o.power))
            .collect();

        request
            .powerplants
            .iter()
            .map(|plant| PlantOutput {
                name: plant.name.clone(),
                power: by_name.get(plant.name.as_str()).copied().unwrap_or(0.0),
            })
            .collect()
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary::from_plan(self)
    }
}
