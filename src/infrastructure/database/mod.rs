//! SQLite database handle with connection pooling
//!
//! The handle is created once by the entry point and its pool is cloned into
//! every repository. Closing it ends the process's access to the store.

pub mod migrations;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::DomainError;

pub use migrations::{
    run_schema_migrations, schema_migrations, Migration, Migrator, SqliteMigrator,
};

/// Owned connection pool to the store
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool for the configured URL
    ///
    /// In-memory databases are private to a connection, so they get exactly
    /// one connection that is never recycled.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| DomainError::storage(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections.max(1))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_with(options)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to database: {}", e)))?;

        info!(url = %config.url, "Database connection established");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// True until [`Database::close`] has been called
    pub fn is_active(&self) -> bool {
        !self.pool.is_closed()
    }

    /// Apply all pending schema migrations
    pub async fn migrate(&self) -> Result<(), DomainError> {
        run_schema_migrations(&self.pool).await
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection closed");
    }
}

/// In-memory database with the schema and reference genders in place
#[cfg(test)]
pub(crate) async fn test_database() -> Database {
    let db = Database::connect(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .expect("in-memory database");
    db.migrate().await.expect("migrations");
    db
}
