//! Database connection pool and scoped sessions using sqlx
//!
//! One pool is created per process and shared by every store. Work that
//! needs a connection checks one out with [`Database::session`]; the
//! returned guard puts it back when dropped, whichever way the caller exits.

use std::str::FromStr;

use sqlx::{
    Sqlite, SqlitePool,
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::config::DatabaseConfig;

/// Database errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database URL is not configured")]
    MissingUrl,

    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    #[error("No database connection became available within {0}s")]
    PoolExhausted(u64),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// A pooled connection checked out for one unit of work
///
/// Returned to the pool on drop.
pub type Session = PoolConnection<Sqlite>;

/// Shared connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    acquire_timeout_secs: u64,
}

impl Database {
    /// Open a connection pool sized by `config`
    ///
    /// The pool holds `pool_size` connections and grows to
    /// `pool_size + max_overflow` under load. Connections above `pool_size`
    /// are closed after `pool_recycle_secs` idle, every connection is
    /// replaced once it is `pool_recycle_secs` old, and each checkout pings
    /// the connection first.
    #[instrument(skip_all, fields(url = %config.url))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config.url.trim();
        if url.is_empty() {
            return Err(DatabaseError::MissingUrl);
        }
        if !url.starts_with("sqlite:") {
            return Err(DatabaseError::InvalidUrl(format!(
                "expected a sqlite: URL, got '{}'",
                url.split(':').next().unwrap_or_default()
            )));
        }

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| DatabaseError::InvalidUrl(e.to_string()))?
            .create_if_missing(true);

        // Each in-memory connection is its own database; never recycle it
        let recycle = (!url.contains(":memory:")).then(|| config.recycle_after());

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections())
            .min_connections(config.pool_size)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(recycle)
            .max_lifetime(recycle)
            .test_before_acquire(true)
            .connect_with(options)
            .await?;

        info!(
            pool_size = config.pool_size,
            max_overflow = config.max_overflow,
            "Database pool created"
        );

        Ok(Self {
            pool,
            acquire_timeout_secs: config.pool_timeout_secs,
        })
    }

    /// Create an in-memory database for testing
    pub async fn in_memory() -> Result<Self, DatabaseError> {
        Self::connect(&DatabaseConfig::in_memory()).await
    }

    /// Get the underlying pool for raw queries
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check out a connection for one unit of work
    pub async fn session(&self) -> Result<Session, DatabaseError> {
        let session = self.pool.acquire().await.map_err(|e| match e {
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted(self.acquire_timeout_secs),
            other => DatabaseError::Sqlx(other),
        })?;
        debug!(open = self.pool.size(), idle = self.pool.num_idle(), "Session opened");
        Ok(session)
    }

    /// Connections currently open, idle or in use
    #[must_use]
    pub fn size(&self) -> u32 {
        self.pool.size()
    }

    /// Close every connection and refuse new checkouts
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
