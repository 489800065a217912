//! Admin account management.
//!
//! ```bash
//! ns-cli admin create -e gerente@nossosushi.pt -n "Gerente" -p 'long passphrase'
//! ```

use nosso_sushi_admin::services::{AuthError, AuthService};
use nosso_sushi_core::AdminUserId;

use super::{ConnectError, connect};

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Admin user already exists with email: {0}")]
    UserExists(String),

    #[error(transparent)]
    Auth(AuthError),
}

/// Create an admin account with an Argon2id-hashed password.
///
/// # Errors
///
/// Returns an error for a malformed email, a short password, a taken email
/// or a database failure.
pub async fn create_user(email: &str, name: &str, password: &str) -> Result<AdminUserId, AdminError> {
    let store = connect().await?;

    tracing::info!("Creating admin user: {}", email);
    let account = AuthService::new(&store)
        .create_admin(email, name, password)
        .await
        .map_err(|e| match e {
            AuthError::UserAlreadyExists => AdminError::UserExists(email.to_owned()),
            other => AdminError::Auth(other),
        })?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}",
        account.id,
        account.email
    );
    Ok(account.id)
}
