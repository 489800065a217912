//! Menu management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use nosso_sushi_core::{MenuFilter, MenuItem, MenuItemId, MenuItemPatch, NewMenuItem, RecordStore};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Every item, hidden ones included.
#[instrument(skip_all)]
pub async fn index<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
) -> Result<Json<Vec<MenuItem>>> {
    let items = state.store().list_menu_items(MenuFilter::default()).await?;
    Ok(Json(items))
}

#[instrument(skip_all, fields(name = %item.name))]
pub async fn create<S: RecordStore>(
    State(state): State<AppState<S>>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Json(item): Json<NewMenuItem>,
) -> Result<(StatusCode, Json<MenuItem>)> {
    if item.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    let created = state.store().create_menu_item(item).await?;
    tracing::info!(admin_id = %admin.id, item_id = %created.id, "menu item created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, _admin, patch))]
pub async fn update<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
    Path(id): Path<MenuItemId>,
    Json(patch): Json<MenuItemPatch>,
) -> Result<Json<MenuItem>> {
    let updated = state.store().update_menu_item(id, patch).await?;
    Ok(Json(updated))
}

#[instrument(skip(state, _admin))]
pub async fn delete<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
    Path(id): Path<MenuItemId>,
) -> Result<StatusCode> {
    state.store().delete_menu_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
