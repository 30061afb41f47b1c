pub mod cost;
pub mod dispatch;
/// Stage-scoped pipeline errors.
pub mod error;
pub mod merit;
pub mod planner;
pub mod summary;
pub mod types;

// Re-export the main types for convenience
pub use cost::CostedPlant;
pub use error::PlanError;
pub use planner::{Planner, ProductionPlan};
pub use summary::PlanSummary;
pub use types::{DispatchRequest, FuelPrices, PlantOutput, PlantSpec, PlantType};
