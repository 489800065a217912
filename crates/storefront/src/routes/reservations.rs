//! Table booking form.

use axum::{Json, extract::State, http::StatusCode};
use nosso_sushi_core::{NewReservation, RecordStore, Reservation};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Store a booking request. It always starts out pending.
#[instrument(skip(state, request), fields(date = %request.date, guests = request.guests))]
pub async fn create<S: RecordStore>(
    State(state): State<AppState<S>>,
    Json(request): Json<NewReservation>,
) -> Result<(StatusCode, Json<Reservation>)> {
    let request = request.validated()?;
    let reservation = state.store().create_reservation(request).await?;

    tracing::info!(reservation_id = %reservation.id, "reservation requested");
    Ok((StatusCode::CREATED, Json(reservation)))
}
