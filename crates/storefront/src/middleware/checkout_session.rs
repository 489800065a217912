//! Extractor for the visitor's checkout state.
//!
//! The cart, the guest's details and the placement phase are stored as one
//! [`Checkout`] value under [`CHECKOUT_KEY`]. Handlers take a
//! [`CheckoutSession`], mutate `checkout`, then call
//! [`save`](CheckoutSession::save).

use axum::{extract::FromRequestParts, http::request::Parts};
use nosso_sushi_core::Checkout;
use tower_sessions::Session;

use crate::error::AppError;

/// Session key for the visitor's checkout.
pub const CHECKOUT_KEY: &str = "checkout";

/// The visitor's checkout, loaded from the session.
///
/// A visitor without a stored checkout gets an empty one.
///
/// # Example
///
/// ```rust,ignore
/// async fn clear(mut session: CheckoutSession) -> Result<StatusCode> {
///     session.checkout.cart.clear();
///     session.save().await?;
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct CheckoutSession {
    session: Session,
    pub checkout: Checkout,
}

impl CheckoutSession {
    /// Write `checkout` back to the session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store rejects the write.
    pub async fn save(&self) -> Result<(), AppError> {
        self.session.insert(CHECKOUT_KEY, &self.checkout).await?;
        Ok(())
    }

    /// Like [`save`](Self::save), then write the session through to its
    /// store now instead of when the response is sent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store rejects the write.
    pub async fn persist(&self) -> Result<(), AppError> {
        self.save().await?;
        self.session.save().await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for CheckoutSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer is not installed".to_string()))?;

        let checkout = session
            .get::<Checkout>(CHECKOUT_KEY)
            .await?
            .unwrap_or_default();

        Ok(Self { session, checkout })
    }
}
