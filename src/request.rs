//! Boundary validation of `/productionplan` payloads.
//!
//! Turns raw JSON into a typed [`DispatchRequest`] before anything reaches
//! the planner. Both the CLI and the HTTP API go through here.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::plan::types::DispatchRequest;

/// Top-level keys every payload must carry.
pub const REQUIRED_KEYS: [&str; 3] = ["load", "fuels", "powerplants"];

/// Payload rejected before planning.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("payload is not valid JSON")]
    Malformed(#[source] serde_json::Error),
    #[error("payload must be a JSON object")]
    NotAnObject,
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("payload does not match the request schema")]
    Schema(#[source] serde_json::Error),
    #[error("duplicate plant name `{0}`")]
    DuplicatePlant(String),
}

/// Parses and validates a payload from raw JSON text.
///
/// # Errors
///
/// Returns a [`RequestError`] if the text is not JSON or fails
/// [`request_from_value`].
pub fn parse_request(raw: &str) -> Result<DispatchRequest, RequestError> {
    let value: Value = serde_json::from_str(raw).map_err(RequestError::Malformed)?;
    request_from_value(value)
}

/// Validates a decoded JSON payload.
///
/// Checks for the required top-level keys first so a missing section is
/// reported by name rather than as a schema mismatch.
///
/// # Errors
///
/// Returns a [`RequestError`] for a non-object payload, missing keys, fields
/// of the wrong type or duplicate plant names.
pub fn request_from_value(value: Value) -> Result<DispatchRequest, RequestError> {
    let Value::Object(map) = &value else {
        return Err(RequestError::NotAnObject);
    };

    let missing: Vec<&'static str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !map.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(RequestError::MissingFields(missing));
    }

    let request: DispatchRequest = serde_json::from_value(value).map_err(RequestError::Schema)?;

    let mut seen = HashSet::with_capacity(request.powerplants.len());
    for plant in &request.powerplants {
        if !seen.insert(plant.name.as_str()) {
            return Err(RequestError::DuplicatePlant(plant.name.clone()));
        }
    }

    Ok(request)
}
