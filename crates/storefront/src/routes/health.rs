//! Liveness and readiness probes.

use axum::{extract::State, http::StatusCode};
use nosso_sushi_core::RecordStore;

use crate::state::AppState;

/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// 503 when the record store does not answer.
pub async fn readiness<S: RecordStore>(State(state): State<AppState<S>>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
