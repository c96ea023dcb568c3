//! Database layer for WikiQuiz
//!
//! Provides:
//! - SeaORM entity models
//! - Repository pattern for data access
//! - Connection pool management
//! - Startup schema creation

pub mod models;
mod repository;

pub use repository::{QuizSummary, Repository};

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;
use tracing::info;

/// Database connection pool wrapper
///
/// Each query checks a connection out of the pool and hands it back when
/// the query finishes, whether it succeeded or not.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Create a new database pool from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to database...");

        let mut opts = ConnectOptions::new(&config.url);
        opts
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .sqlx_logging(true);

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect: {}", e)
            })?;

        info!(backend = ?conn.get_database_backend(), "Database connection established");

        Ok(Self { conn })
    }

    /// Connect and make sure the schema exists
    pub async fn connect_and_prepare(config: &DatabaseConfig) -> Result<Self> {
        let pool = Self::new(config).await?;
        pool.ensure_schema().await?;
        Ok(pool)
    }

    /// Get the underlying connection
    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Create the `quizzes` table if it is missing. There are no migrations.
    pub async fn ensure_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut table = schema.create_table_from_entity(models::QuizEntity);
        table.if_not_exists();

        self.conn.execute(backend.build(&table)).await?;

        info!("Database schema ready");
        Ok(())
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        self.conn
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Ping failed: {}", e),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let pool = DbPool::connect_and_prepare(&DatabaseConfig::in_memory()).await.unwrap();
        tokio_test::assert_ok!(pool.ensure_schema().await);
        tokio_test::assert_ok!(pool.ping().await);
    }

    #[tokio::test]
    async fn test_bad_url_is_connection_error() {
        let config = DatabaseConfig {
            url: "notadb://nowhere".to_string(),
            ..DatabaseConfig::in_memory()
        };
        let err = DbPool::new(&config).await.err().unwrap();
        assert!(matches!(err, AppError::DatabaseConnection { .. }));
    }
}
