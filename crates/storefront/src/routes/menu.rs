//! Public menu.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use nosso_sushi_core::{Category, MenuFilter, MenuItem, MenuItemId, RecordStore};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<Category>,
}

/// Active items, ordered for display.
#[instrument(skip(state))]
pub async fn index<S: RecordStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<MenuQuery>,
) -> Result<Json<Vec<MenuItem>>> {
    let filter = MenuFilter::active().with_category(query.category);
    let items = state.store().list_menu_items(filter).await?;
    Ok(Json(items))
}

/// One active item. Hidden items are reported as missing.
#[instrument(skip(state))]
pub async fn show<S: RecordStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<MenuItemId>,
) -> Result<Json<MenuItem>> {
    state
        .store()
        .get_menu_item(id)
        .await?
        .filter(|item| item.is_active)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))
}
