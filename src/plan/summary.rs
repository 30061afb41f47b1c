//! Post-hoc summary of a production plan.

use std::fmt;

use super::planner::ProductionPlan;

/// Unmet load below half the 2-decimal output resolution counts as covered.
pub const UNMET_TOLERANCE_MW: f64 = 0.005;

/// Aggregate figures derived from a completed production plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    /// Load the plan was computed for (MW).
    pub total_load_mw: f64,
    /// Sum of assigned power (MW).
    pub dispatched_mw: f64,
    /// Load left uncovered (MW, never negative).
    pub unmet_load_mw: f64,
    /// Generation cost of one hour at the planned output (€).
    pub hourly_cost_eur: f64,
    /// Number of plants with non-zero output.
    pub running_plants: usize,
    /// Number of plants in the plan.
    pub plant_count: usize,
}

impl PlanSummary {
    /// Computes the summary from the index-aligned merit order and outputs.
    pub fn from_plan(plan: &ProductionPlan) -> Self {
        let mut dispatched = 0.0_f64;
        let mut cost = 0.0_f64;
        let mut running = 0_usize;

        for (plant, output) in plan.merit_order.iter().zip(&plan.outputs) {
            dispatched += output.power;
            cost += output.power * plant.marginal_cost;
            if output.power > 0.0 {
                running += 1;
            }
        }

        Self {
            total_load_mw: plan.total_load,
            dispatched_mw: dispatched,
            unmet_load_mw: (plan.total_load - dispatched).max(0.0),
            hourly_cost_eur: cost,
            running_plants: running,
            plant_count: plan.outputs.len(),
        }
    }
}

impl PlanSummary {
    /// Whether the plan covers its load, ignoring rounding dust.
    pub fn covers_load(&self) -> bool {
        self.unmet_load_mw < UNMET_TOLERANCE_MW
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Plan Summary ---")?;
        writeln!(f, "Total load:        {:.2} MW", self.total_load_mw)?;
        writeln!(f, "Dispatched:        {:.2} MW", self.dispatched_mw)?;
        writeln!(f, "Unmet load:        {:.2} MW", self.unmet_load_mw)?;
        writeln!(f, "Hourly cost:       {:.2} EUR", self.hourly_cost_eur)?;
        write!(
            f,
            "Running plants:    {} of {}",
            self.running_plants, self.plant_count
        )
    }
}
