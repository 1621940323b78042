use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the worker pool is still accepting jobs.
    pub queue_healthy: bool,
}

/// GET /health -- returns service and job-queue health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let queue_healthy = state.queue.is_open();

    let status = if queue_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        queue_healthy,
    })
}

/// Mount health check routes (intended for root-level mounting).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
