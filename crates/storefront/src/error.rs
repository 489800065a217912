//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server faults to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`. Responses are JSON: `{"error": "..."}`, plus a
//! `fields` list when checkout details are incomplete.

use std::collections::BTreeSet;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nosso_sushi_core::{
    CheckoutError, CheckoutField, ContactError, ReservationError, StoreError,
};
use serde::Serialize;
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Record store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Order placement was refused or failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Session could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Well-formed request with invalid content.
    #[error("Invalid input: {0}")]
    Unprocessable(String),

    /// Rate limited.
    #[error("Rate limited")]
    RateLimited,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        Self::Unprocessable(err.to_string())
    }
}

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        Self::Unprocessable(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a BTreeSet<CheckoutField>>,
}

impl AppError {
    /// Faults on our side or in the store; these go to Sentry.
    const fn is_server_fault(&self) -> bool {
        match self {
            Self::Store(err) => !matches!(err, StoreError::NotFound { .. } | StoreError::Conflict(_)),
            Self::Checkout(err) => matches!(err, CheckoutError::Store(_)),
            Self::Session(_) | Self::Internal(_) => true,
            Self::NotFound(_) | Self::BadRequest(_) | Self::Unprocessable(_) | Self::RateLimited => {
                false
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::NotFound { .. }) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Store(_) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart | CheckoutError::InProgress => StatusCode::CONFLICT,
                CheckoutError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CheckoutError::Store(_) => StatusCode::BAD_GATEWAY,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    // Don't expose internal error details to clients
    fn public_message(&self) -> String {
        match self {
            Self::Store(StoreError::NotFound { collection, .. }) => format!("{collection} not found"),
            Self::Store(StoreError::Conflict(_)) => "Conflicting update".to_string(),
            Self::Store(_) | Self::Session(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            Self::Checkout(CheckoutError::Store(_)) => {
                "Could not place your order, please try again".to_string()
            }
            Self::Checkout(err) => err.to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_fault() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        let fields = match &self {
            Self::Checkout(CheckoutError::Invalid(fields)) => Some(fields),
            _ => None,
        };
        let body = ErrorBody {
            error: self.public_message(),
            fields,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("menu item 12".to_string());
        assert_eq!(err.to_string(), "Not found: menu item 12");
    }

    #[test]
    fn test_checkout_error_status_codes() {
        assert_eq!(
            get_status(CheckoutError::EmptyCart.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(CheckoutError::Invalid(BTreeSet::from([CheckoutField::Phone])).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(CheckoutError::Store(StoreError::Backend("down".into())).into()),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_store_error_status_codes() {
        assert_eq!(
            get_status(StoreError::NotFound { collection: "menu item", id: 1 }.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(StoreError::Backend("connection reset".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(get_status(AppError::RateLimited), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_invalid_checkout_lists_fields() {
        let err: AppError = CheckoutError::Invalid(BTreeSet::from([
            CheckoutField::Phone,
            CheckoutField::Address,
        ]))
        .into();
        let body = err.into_response().into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["fields"], serde_json::json!(["phone", "address"]));
    }

    #[tokio::test]
    async fn test_backend_details_are_hidden() {
        let err: AppError = StoreError::Backend("password authentication failed".into()).into();
        let body = err.into_response().into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("password"));
    }
}
