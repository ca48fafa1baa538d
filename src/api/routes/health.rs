//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (NAV log is readable)
//! - GET /health - Full health status
//!
//! Readiness does not contact the RPC node; a slow public node should not
//! take the dashboard out of rotation.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 200 if the NAV log can be found.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match check_history_health(&state).await {
        true => StatusCode::OK,
        false => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let history_ok = check_history_health(&state).await;

    Json(HealthResponse {
        status: if history_ok { "healthy" } else { "degraded" }.to_string(),
        history: if history_ok { "ok" } else { "missing" }.to_string(),
        contract: state.chain.contract_address().checksummed(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// The NAV log exists and is a regular file
async fn check_history_health(state: &AppState) -> bool {
    match tokio::fs::metadata(&state.history_path).await {
        Ok(meta) => meta.is_file(),
        Err(e) => {
            tracing::warn!(path = %state.history_path.display(), error = %e, "NAV log not readable");
            false
        }
    }
}
