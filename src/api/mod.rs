//! REST API for production-plan computation.
//!
//! Provides two endpoints:
//! - `POST /productionplan`: computes a plan for a JSON payload
//! - `GET /config`: model parameters the planner runs with

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::plan::planner::Planner;

pub use types::{ErrorResponse, OutputOrder, PlanQuery};

/// Immutable application state shared across all request handlers.
///
/// Every request builds its own working set from the payload, so the
/// planner is the only shared piece and needs no locking.
pub struct AppState {
    /// Planner configured with the active model parameters.
    pub planner: Planner,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/productionplan", post(handlers::production_plan))
        .route("/config", get(handlers::get_config))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
