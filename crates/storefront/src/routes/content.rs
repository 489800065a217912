//! Read-only site content: visible reviews and public settings.

use axum::{Json, extract::State};
use nosso_sushi_core::{RecordStore, Review, SiteSettings};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn reviews<S: RecordStore>(State(state): State<AppState<S>>) -> Result<Json<Vec<Review>>> {
    Ok(Json(state.store().list_reviews(true).await?))
}

#[instrument(skip(state))]
pub async fn settings<S: RecordStore>(State(state): State<AppState<S>>) -> Result<Json<SiteSettings>> {
    Ok(Json(SiteSettings::load(state.store()).await?))
}
