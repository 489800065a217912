//! Booking requests: confirm, cancel, restore.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use nosso_sushi_core::{
    RecordStore, Reservation, ReservationId, ReservationStatus, TransitionError,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<ReservationStatus>,
}

#[instrument(skip(state, _admin))]
pub async fn index<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Reservation>>> {
    Ok(Json(state.store().list_reservations(query.status).await?))
}

#[instrument(skip(state, _admin))]
pub async fn confirm<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
    Path(id): Path<ReservationId>,
) -> Result<Json<Reservation>> {
    transition(&state, id, ReservationStatus::confirm).await
}

#[instrument(skip(state, _admin))]
pub async fn cancel<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
    Path(id): Path<ReservationId>,
) -> Result<Json<Reservation>> {
    transition(&state, id, ReservationStatus::cancel).await
}

/// Put a cancelled booking back in the pending queue.
#[instrument(skip(state, _admin))]
pub async fn restore<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
    Path(id): Path<ReservationId>,
) -> Result<Json<Reservation>> {
    transition(&state, id, ReservationStatus::restore).await
}

async fn transition<S: RecordStore>(
    state: &AppState<S>,
    id: ReservationId,
    step: fn(ReservationStatus) -> std::result::Result<ReservationStatus, TransitionError>,
) -> Result<Json<Reservation>> {
    let reservation = state
        .store()
        .get_reservation(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("reservation {id}")))?;

    let to = step(reservation.status)?;
    let updated = state.store().update_reservation_status(id, to).await?;
    tracing::info!(reservation_id = %id, from = %reservation.status, %to, "reservation status changed");
    Ok(Json(updated))
}
