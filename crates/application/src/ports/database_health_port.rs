//! Store connectivity probe

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// What a successful probe observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHealth {
    /// Engine name and version, e.g. `SQLite 3.45.0`
    pub engine: String,
    /// Connections the pool held when the probe finished
    pub open_connections: u32,
    /// Time taken to check out a session and run the probe
    pub latency: Duration,
}

/// Probes the load store with a trivial query
///
/// An unreachable store is reported as an error, never as a value.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError>;
}
