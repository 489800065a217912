//! Database connection for admin.
//!
//! The admin reads and writes the same restaurant database as the
//! storefront. Migrations are applied with `ns-cli migrate`.

use std::time::Duration;

use nosso_sushi_core::PgRecordStore;
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;

/// A handful of staff at most.
const MAX_CONNECTIONS: u32 = 5;

/// Connect to `PostgreSQL` and wrap the pool in a record store.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn connect_store(database_url: &SecretString) -> Result<PgRecordStore, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await?;
    Ok(PgRecordStore::new(pool))
}
