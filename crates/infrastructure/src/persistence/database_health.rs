//! SQLite database health adapter
//!
//! Answers `/health` by running `SELECT 1` in a pooled session.

use std::time::Instant;

use application::error::ApplicationError;
use application::ports::{DatabaseHealth, DatabaseHealthPort};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::{Database, error::map_sqlx_error};

/// SQLite database health adapter
#[derive(Debug, Clone)]
pub struct SqliteDatabaseHealth {
    db: Database,
}

impl SqliteDatabaseHealth {
    /// Create a new database health adapter with the given connection pool
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    async fn probe(&self) -> Result<String, ApplicationError> {
        // Released when dropped, on success and on every error path
        let mut session = self.db.session().await?;

        let _: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&mut *session)
            .await
            .map_err(map_sqlx_error)?;

        let version: String = sqlx::query_scalar("SELECT sqlite_version()")
            .fetch_one(&mut *session)
            .await
            .unwrap_or_else(|_| "unknown".to_string());

        Ok(version)
    }
}

#[async_trait]
impl DatabaseHealthPort for SqliteDatabaseHealth {
    #[instrument(skip(self))]
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError> {
        let start = Instant::now();

        let version = self.probe().await.inspect_err(|e| {
            warn!(error = %e, "Database health check failed");
        })?;

        let health = DatabaseHealth {
            engine: format!("SQLite {version}"),
            open_connections: self.db.size(),
            latency: start.elapsed(),
        };
        debug!(
            engine = %health.engine,
            open_connections = health.open_connections,
            latency_ms = health.latency.as_millis(),
            "Database health check passed"
        );
        Ok(health)
    }
}
