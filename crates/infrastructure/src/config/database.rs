//! Database connection pool configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::default_true;

/// Relational store configuration
///
/// The pool keeps `pool_size` connections warm and may open up to
/// `max_overflow` more under load; the extras are closed again once they
/// sit idle for `pool_recycle_secs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (e.g. `sqlite:freightgate.db` or `sqlite::memory:`)
    #[serde(default = "default_url")]
    pub url: String,

    /// Connections kept open at all times
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Extra connections allowed beyond `pool_size`
    #[serde(default = "default_max_overflow")]
    pub max_overflow: u32,

    /// Seconds to wait for a free connection before giving up
    #[serde(default = "default_pool_timeout")]
    pub pool_timeout_secs: u64,

    /// Seconds after which a connection is closed and replaced
    #[serde(default = "default_pool_recycle")]
    pub pool_recycle_secs: u64,

    /// Whether the server creates missing tables on startup (default: true)
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

fn default_url() -> String {
    "sqlite:freightgate.db".to_string()
}

const fn default_pool_size() -> u32 {
    5
}

const fn default_max_overflow() -> u32 {
    2
}

const fn default_pool_timeout() -> u64 {
    30
}

const fn default_pool_recycle() -> u64 {
    1800
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            pool_size: default_pool_size(),
            max_overflow: default_max_overflow(),
            pool_timeout_secs: default_pool_timeout(),
            pool_recycle_secs: default_pool_recycle(),
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database
    ///
    /// SQLite gives every connection its own in-memory database, so the pool
    /// is pinned to a single connection.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            max_overflow: 0,
            ..Self::default()
        }
    }

    /// Upper bound on open connections
    #[must_use]
    pub const fn max_connections(&self) -> u32 {
        self.pool_size.saturating_add(self.max_overflow)
    }

    /// How long a checkout may wait for a connection
    #[must_use]
    pub const fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout_secs)
    }

    /// Lifetime and idle limit for pooled connections
    #[must_use]
    pub const fn recycle_after(&self) -> Duration {
        Duration::from_secs(self.pool_recycle_secs)
    }
}
