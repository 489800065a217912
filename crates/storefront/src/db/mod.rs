//! Database connection for the storefront.
//!
//! The storefront shares the restaurant database with the admin. Schema and
//! migrations live in `crates/core/migrations/` and are applied with
//! `ns-cli migrate`; the server never migrates on startup.

use std::time::Duration;

use nosso_sushi_core::PgRecordStore;
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;

/// Public traffic is mostly menu reads; a small pool suffices.
const MAX_CONNECTIONS: u32 = 10;

/// Connect to `PostgreSQL` and wrap the pool in a record store.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn connect_store(database_url: &SecretString) -> Result<PgRecordStore, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await?;
    Ok(PgRecordStore::new(pool))
}
