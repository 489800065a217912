//! Site settings editor.

use axum::{Json, extract::State};
use nosso_sushi_core::{RecordStore, SiteSettings};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

#[instrument(skip_all)]
pub async fn show<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
) -> Result<Json<SiteSettings>> {
    Ok(Json(SiteSettings::load(state.store()).await?))
}

/// Replace all four settings documents.
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn update<S: RecordStore>(
    State(state): State<AppState<S>>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Json(settings): Json<SiteSettings>,
) -> Result<Json<SiteSettings>> {
    settings.save(state.store()).await?;
    tracing::info!("site settings updated");
    Ok(Json(settings))
}
