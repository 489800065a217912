//! Admin authentication error types.

use nosso_sushi_core::{EmailError, StoreError};
use thiserror::Error;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Wrong password or unknown email; the two are not distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("admin user already exists")]
    UserAlreadyExists,

    #[error("password validation failed: {0}")]
    WeakPassword(String),

    #[error("password hashing error")]
    PasswordHash,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
