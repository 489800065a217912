//! Contact inbox.

use axum::{
    Json,
    extract::{Path, State},
};
use nosso_sushi_core::{Contact, ContactId, RecordStore};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReadFlag {
    pub is_read: bool,
}

#[instrument(skip_all)]
pub async fn index<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
) -> Result<Json<Vec<Contact>>> {
    Ok(Json(state.store().list_contacts().await?))
}

/// Mark a message read, or back to unread.
#[instrument(skip(state, _admin))]
pub async fn mark_read<S: RecordStore>(
    State(state): State<AppState<S>>,
    _admin: RequireAdminAuth,
    Path(id): Path<ContactId>,
    Json(body): Json<ReadFlag>,
) -> Result<Json<Contact>> {
    Ok(Json(state.store().mark_contact_read(id, body.is_read).await?))
}
