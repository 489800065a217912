//! Dashboard overview.

use axum::{Json, extract::State};
use chrono::Utc;
use nosso_sushi_core::{DashboardStats, RecordStore};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Revenue, today's orders, pending bookings, unread messages and the
/// latest orders and bookings.
#[instrument(skip_all)]
pub async fn stats<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
) -> Result<Json<DashboardStats>> {
    let store = state.store();
    let orders = store.list_orders(None).await?;
    let reservations = store.list_reservations(None).await?;
    let contacts = store.list_contacts().await?;

    Ok(Json(DashboardStats::compute(
        &orders,
        &reservations,
        &contacts,
        Utc::now().date_naive(),
    )))
}
