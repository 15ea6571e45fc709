//! Liveness and readiness checks.

use axum::extract::State;

use crate::error::Result;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Checks the backend's auth health endpoint; 503 when it does not answer.
pub async fn readiness(State(state): State<AppState>) -> Result<&'static str> {
    state.backend().health().await?;
    Ok("ok")
}
