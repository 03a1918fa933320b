//! Embedded schema migrations, applied once at startup.
//!
//! Migrations run on a synchronous connection before the async pool is
//! built; the server never serves traffic against an unmigrated schema.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The database could not be reached.
    #[error("failed to connect for migrations: {0}")]
    Connection(#[from] diesel::ConnectionError),
    /// A migration failed to apply.
    #[error("failed to run migrations: {0}")]
    Migration(String),
}

/// Apply all pending embedded migrations against `database_url`.
///
/// # Errors
/// Returns [`MigrationError`] when the database is unreachable or a
/// migration fails; the caller should abort startup rather than retry.
pub fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Migration(err.to_string()))?;

    if applied.is_empty() {
        info!("schema is up to date");
    } else {
        info!(count = applied.len(), "applied pending migrations");
    }
    Ok(())
}
