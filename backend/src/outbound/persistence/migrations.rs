//! Embedded Diesel migrations for the habits schema.
//!
//! Diesel's migration harness is synchronous, so [`run_pending`] is driven
//! from a blocking task when called inside the async runtime.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled in from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    #[error("migration task aborted: {message}")]
    Join { message: String },
}

/// Apply every pending migration and return the applied versions.
pub fn run_pending(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| {
        MigrationError::Connect {
            message: err.to_string(),
        }
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();

    info!(count = applied.len(), "applied pending migrations");
    Ok(applied)
}

/// Async wrapper around [`run_pending`] for use inside Tokio.
pub async fn run_pending_async(database_url: String) -> Result<Vec<String>, MigrationError> {
    tokio::task::spawn_blocking(move || run_pending(&database_url))
        .await
        .map_err(|err| MigrationError::Join {
            message: err.to_string(),
        })?
}

#[cfg(test)]
mod tests {
    use diesel::pg::Pg;
    use diesel::migration::MigrationSource;

    use super::*;

    #[test]
    fn habits_migration_is_embedded() {
        let migrations =
            MigrationSource::<Pg>::migrations(&MIGRATIONS).expect("embedded migrations");
        let names: Vec<String> = migrations
            .iter()
            .map(|migration| migration.name().to_string())
            .collect();
        assert!(
            names.iter().any(|name| name.contains("create_habits")),
            "expected the habits migration, found {names:?}"
        );
    }

    #[test]
    fn unreachable_database_is_a_connect_error() {
        let err = run_pending("not a connection string").expect_err("connection fails");
        assert!(matches!(err, MigrationError::Connect { .. }));
    }
}
