//! API query and error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::plan::error::PlanError;
use crate::request::RequestError;

/// Order of the plants in a production-plan response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputOrder {
    /// Dispatch priority, wind first.
    #[default]
    Merit,
    /// Order of the `powerplants` array in the payload.
    Request,
}

/// Optional query parameters for the production-plan endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PlanQuery {
    pub order: Option<OutputOrder>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Pipeline stage that failed, for planning errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<&'static str>,
}

/// Failure of a production-plan request, mapped to an HTTP status.
#[derive(Debug)]
pub enum ApiError {
    /// Content type is not `application/json`.
    UnsupportedContentType,
    /// Payload rejected by boundary validation.
    InvalidRequest(RequestError),
    /// The planner failed in one of its stages.
    Plan(PlanError),
    /// The blocking planning task panicked or was cancelled.
    Worker(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::UnsupportedContentType => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid content type, expecting application/json".to_string(),
                    stage: None,
                },
            ),
            Self::InvalidRequest(err) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: error_chain(&err),
                    stage: None,
                },
            ),
            Self::Plan(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: error_chain(&err),
                    stage: Some(err.stage()),
                },
            ),
            Self::Worker(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: format!("planning task failed: {message}"),
                    stage: None,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Joins an error and its sources into one `outer: inner` message.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
