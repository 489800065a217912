//! Order queue and status changes.
//!
//! Orders only move one step forward at a time or get cancelled. Both
//! actions read the current status and write the next one; concurrent
//! edits are last-write-wins.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use nosso_sushi_core::{Order, OrderId, OrderStatus, RecordStore, TransitionError};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<OrderStatus>,
}

/// Orders newest first, optionally filtered by status.
#[instrument(skip(state, _admin))]
pub async fn index<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.store().list_orders(query.status).await?))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn advance<S: RecordStore>(
    State(state): State<AppState<S>>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    transition(&state, id, OrderStatus::try_advance).await
}

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn cancel<S: RecordStore>(
    State(state): State<AppState<S>>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    transition(&state, id, OrderStatus::cancel).await
}

async fn transition<S: RecordStore>(
    state: &AppState<S>,
    id: OrderId,
    step: fn(OrderStatus) -> std::result::Result<OrderStatus, TransitionError>,
) -> Result<Json<Order>> {
    let order = state
        .store()
        .get_order(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let from = order.status;
    let to = step(from)?;
    let updated = state.store().update_order_status(id, to).await?;

    tracing::info!(order_id = %id, %from, %to, "order status changed");
    Ok(Json(updated))
}
