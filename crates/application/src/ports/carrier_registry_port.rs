//! Carrier registry port
//!
//! Abstracts the regulatory lookup service that knows a carrier's operating
//! authority.

use async_trait::async_trait;
use domain::{CarrierSnapshot, McNumber};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Lookup of carrier records by MC number
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CarrierRegistryPort: Send + Sync {
    /// Fetch the carrier registered under the given MC number
    ///
    /// Returns `Ok(None)` when the registry has no carrier for it.
    async fn find_by_mc_number(
        &self,
        mc_number: &McNumber,
    ) -> Result<Option<CarrierSnapshot>, ApplicationError>;
}
