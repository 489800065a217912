//! Admin authentication service.
//!
//! Staff sign in with email and password. Passwords are hashed with
//! Argon2id and only the PHC string is stored.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use nosso_sushi_core::{AdminAccount, Email, NewAdmin, RecordStore, StoreError};
use tracing::instrument;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Login and account creation over any record store.
pub struct AuthService<'a, S> {
    store: &'a S,
}

impl<'a, S: RecordStore> AuthService<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Check an email and password pair.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email or a
    /// wrong password, and `AuthError::Store` if the lookup fails.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminAccount, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        let account = self
            .store
            .find_admin_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &account.password_hash)?;
        Ok(account)
    }

    /// Create an admin account with a freshly hashed password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail`, `AuthError::WeakPassword`, or
    /// `AuthError::UserAlreadyExists` when the email is taken.
    #[instrument(skip(self, password))]
    pub async fn create_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AdminAccount, AuthError> {
        let email = Email::parse(email)?;
        let password_hash = hash_password(password)?;

        self.store
            .create_admin(NewAdmin {
                email,
                name: name.trim().to_owned(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Store(other),
            })
    }
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate and hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` for short passwords and
/// `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    validate_password(password)?;
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nosso_sushi_core::MemoryStore;

    use super::*;

    #[test]
    fn test_hash_is_salted_phc_string() {
        let first = hash_password("omakase-2026").unwrap();
        let second = hash_password("omakase-2026").unwrap();
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(verify_password("omakase-2026", &first).is_ok());
        assert!(verify_password("omakase-2027", &first).is_err());
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(matches!(
            hash_password("sushi"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let store = MemoryStore::new();
        let service = AuthService::new(&store);
        service
            .create_admin("Chef@NossoSushi.pt", " Chef ", "omakase-2026")
            .await
            .unwrap();

        let account = service
            .login("chef@nossosushi.pt", "omakase-2026")
            .await
            .unwrap();
        assert_eq!(account.name, "Chef");

        assert!(matches!(
            service.login("chef@nossosushi.pt", "wrong-password").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("nobody@nossosushi.pt", "omakase-2026").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_admin_conflicts() {
        let store = MemoryStore::new();
        let service = AuthService::new(&store);
        service
            .create_admin("chef@nossosushi.pt", "Chef", "omakase-2026")
            .await
            .unwrap();
        assert!(matches!(
            service
                .create_admin("chef@nossosushi.pt", "Chef", "omakase-2026")
                .await,
            Err(AuthError::UserAlreadyExists)
        ));
    }
}
