//! Load persistence port

use async_trait::async_trait;
use domain::{Load, ReferenceNumber};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Storage for freight loads keyed by reference number
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LoadStore: Send + Sync {
    /// Look up a single load by its normalised reference number
    async fn find_by_reference(
        &self,
        reference: &ReferenceNumber,
    ) -> Result<Option<Load>, ApplicationError>;

    /// Create the backing table if it does not exist yet
    async fn ensure_schema(&self) -> Result<(), ApplicationError>;

    /// Insert or replace every load in a single transaction
    ///
    /// Either all rows are committed or none are. Returns the number of rows
    /// written.
    async fn upsert_batch(&self, loads: &[Load]) -> Result<usize, ApplicationError>;
}
