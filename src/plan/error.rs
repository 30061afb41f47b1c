//! Stage-scoped failures of the production-plan pipeline.

use thiserror::Error;

/// Cost-model failure for a single plant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    /// A fuel-burning plant needs a strictly positive efficiency.
    #[error("plant `{plant}` burns fuel but has efficiency {efficiency}")]
    InvalidEfficiency { plant: String, efficiency: f64 },
    /// A derived value came out as NaN or infinite.
    #[error("plant `{plant}` has a non-finite {field}")]
    NonFinite { plant: String, field: &'static str },
}

/// Merit-order ranking failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    /// Sort keys must be finite to give a reproducible order.
    #[error("plant `{plant}` has a non-finite {field} sort key")]
    NonFiniteKey { plant: String, field: &'static str },
}

/// Stepped dispatch search failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("total load {0} must be a finite, non-negative number")]
    InvalidLoad(f64),
    #[error("dispatch step {0} must be a finite, positive number")]
    InvalidStep(f64),
    #[error("plant `{plant}` has an invalid output range [{pmin}, {pmax}]")]
    InvalidRange { plant: String, pmin: f64, pmax: f64 },
}

/// Failure of a whole production-plan run, tagged with the failing stage.
///
/// The stage-specific cause is kept as the error source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("cost model failed")]
    CostModel(#[from] CostError),
    #[error("merit-order ranking failed")]
    Ranking(#[from] RankError),
    #[error("dispatch failed")]
    Dispatch(#[from] DispatchError),
}

impl PlanError {
    /// Short name of the pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::CostModel(_) => "cost",
            Self::Ranking(_) => "ranking",
            Self::Dispatch(_) => "dispatch",
        }
    }
}
