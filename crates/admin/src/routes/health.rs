//! Liveness and readiness probes.

use axum::{extract::State, http::StatusCode};
use nosso_sushi_core::RecordStore;

use crate::state::AppState;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn readiness<S: RecordStore>(State(state): State<AppState<S>>) -> StatusCode {
    if let Err(err) = state.store().ping().await {
        tracing::warn!(error = %err, "admin readiness check failed");
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    StatusCode::OK
}
