//! Review moderation.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use nosso_sushi_core::{RecordStore, Review, ReviewId};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Visibility {
    pub is_visible: bool,
}

/// All reviews, hidden ones included.
#[instrument(skip_all)]
pub async fn index<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
) -> Result<Json<Vec<Review>>> {
    Ok(Json(state.store().list_reviews(false).await?))
}

#[instrument(skip(state, _admin))]
pub async fn set_visibility<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
    Path(id): Path<ReviewId>,
    Json(body): Json<Visibility>,
) -> Result<Json<Review>> {
    let review = state
        .store()
        .set_review_visibility(id, body.is_visible)
        .await?;
    Ok(Json(review))
}

#[instrument(skip(state, _admin))]
pub async fn delete<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
    Path(id): Path<ReviewId>,
) -> Result<StatusCode> {
    state.store().delete_review(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
