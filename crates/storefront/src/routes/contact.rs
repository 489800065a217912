//! Contact form.

use axum::{Json, extract::State, http::StatusCode};
use nosso_sushi_core::{Contact, NewContact, RecordStore};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// What the visitor gets back; the stored message stays private.
#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    pub id: nosso_sushi_core::ContactId,
    pub subject: String,
}

impl From<Contact> for ContactReceipt {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            subject: contact.subject,
        }
    }
}

#[instrument(skip(state, form), fields(subject = %form.subject))]
pub async fn create<S: RecordStore>(
    State(state): State<AppState<S>>,
    Json(form): Json<NewContact>,
) -> Result<(StatusCode, Json<ContactReceipt>)> {
    let form = form.validated()?;
    let contact = state.store().create_contact(form).await?;
    Ok((StatusCode::CREATED, Json(contact.into())))
}
