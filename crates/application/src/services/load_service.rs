//! Load lookup service

use std::{fmt, sync::Arc};

use domain::{Load, ReferenceNumber};
use tracing::{debug, error, instrument};

use crate::{error::ApplicationError, ports::LoadStore};

/// Read-only access to loads by reference number
pub struct LoadService {
    store: Arc<dyn LoadStore>,
}

impl fmt::Debug for LoadService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadService").finish_non_exhaustive()
    }
}

impl LoadService {
    /// Create a new load service
    pub fn new(store: Arc<dyn LoadStore>) -> Self {
        Self { store }
    }

    /// Fetch a load by its reference number
    ///
    /// The reference is validated and upper-cased before the store is
    /// queried; invalid input never reaches the store.
    #[instrument(skip(self))]
    pub async fn get_load(&self, reference_number: Option<&str>) -> Result<Load, ApplicationError> {
        let reference = ReferenceNumber::parse_optional(reference_number)?;

        let load = self
            .store
            .find_by_reference(&reference)
            .await
            .map_err(|e| {
                error!(reference_number = %reference, error = %e, "Failed to retrieve load");
                match e {
                    exhausted @ ApplicationError::ResourceExhausted(_) => exhausted,
                    other => ApplicationError::Internal(other.to_string()),
                }
            })?;

        load.ok_or_else(|| {
            debug!(reference_number = %reference, "Load not found");
            ApplicationError::NotFound(format!(
                "Load with reference number {reference} not found"
            ))
        })
    }
}
