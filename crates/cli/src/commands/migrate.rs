//! Database migration command.
//!
//! Applies `crates/core/migrations/`: the restaurant tables plus the
//! session tables used by the storefront (`tower_sessions.session`) and the
//! admin (`admin.session`).
//!
//! ```bash
//! ns-cli migrate
//! ```

use super::{ConnectError, connect};

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let store = connect().await?;

    tracing::info!("Running migrations...");
    store.migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
