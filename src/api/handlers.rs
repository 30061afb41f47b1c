//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{info, warn};

use super::AppState;
use super::types::{ApiError, OutputOrder, PlanQuery};
use crate::config::ModelConfig;
use crate::plan::types::PlantOutput;
use crate::request::{RequestError, request_from_value};

/// Computes the production plan for the posted payload.
///
/// `POST /productionplan` → 200 + `Vec<PlantOutput>` JSON in merit order
/// `POST /productionplan?order=request` → same plan in payload order
/// Non-JSON content type or invalid payload → 400 + `ErrorResponse`
/// Planner stage failure → 422 + `ErrorResponse` with `stage`
///
/// Planning runs on the blocking pool.
pub async fn production_plan(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlanQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Vec<PlantOutput>>, ApiError> {
    if !is_json(&headers) {
        warn!("rejected payload with non-JSON content type");
        return Err(ApiError::UnsupportedContentType);
    }

    let value: Value = serde_json::from_slice(&body)
        .map_err(|err| ApiError::InvalidRequest(RequestError::Malformed(err)))?;
    let request = request_from_value(value).map_err(|err| {
        warn!(error = %err, "rejected invalid payload");
        ApiError::InvalidRequest(err)
    })?;

    let (plan, request) = tokio::task::spawn_blocking(move || {
        let plan = state.planner.plan(&request);
        (plan, request)
    })
    .await
    .map_err(|err| ApiError::Worker(err.to_string()))?;

    let plan = plan.map_err(|err| {
        warn!(stage = err.stage(), error = %err, "planning failed");
        ApiError::Plan(err)
    })?;

    info!(
        load = request.total_load,
        plants = request.powerplants.len(),
        "served production plan"
    );

    let outputs = match query.order.unwrap_or_default() {
        OutputOrder::Merit => plan.into_outputs(),
        OutputOrder::Request => plan.in_request_order(&request),
    };
    Ok(Json(outputs))
}

/// Returns the model parameters the planner runs with.
///
/// `GET /config` → 200 + `ModelConfig` JSON
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ModelConfig> {
    Json(state.planner.model().clone())
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
