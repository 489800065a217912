//! Subcommand implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use nosso_sushi_admin::config::{ConfigError, get_database_url};
use nosso_sushi_admin::db::connect_store;
use nosso_sushi_core::PgRecordStore;

/// Errors shared by every command that talks to the database.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Connect using `ADMIN_DATABASE_URL`, or `DATABASE_URL` when unset.
///
/// # Errors
///
/// Returns an error if neither variable is set or the connection fails.
pub async fn connect() -> Result<PgRecordStore, ConnectError> {
    dotenvy::dotenv().ok();
    let database_url = get_database_url("ADMIN_DATABASE_URL")?;

    tracing::info!("Connecting to database...");
    Ok(connect_store(&database_url).await?)
}
