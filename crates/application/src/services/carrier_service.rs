//! Carrier verification service

use std::{fmt, sync::Arc};

use domain::{CarrierVerification, McNumber};
use tracing::{info, instrument, warn};

use crate::{error::ApplicationError, ports::CarrierRegistryPort};

/// Verifies a carrier's operating authority against the registry
pub struct CarrierVerificationService {
    registry: Arc<dyn CarrierRegistryPort>,
}

impl fmt::Debug for CarrierVerificationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarrierVerificationService")
            .finish_non_exhaustive()
    }
}

impl CarrierVerificationService {
    /// Create a new carrier verification service
    pub fn new(registry: Arc<dyn CarrierRegistryPort>) -> Self {
        Self { registry }
    }

    /// Verify the carrier registered under `mc_number`
    ///
    /// The MC number is validated before the registry is contacted, so a
    /// missing number never causes an outbound call.
    #[instrument(skip(self))]
    pub async fn verify(
        &self,
        mc_number: Option<&str>,
    ) -> Result<CarrierVerification, ApplicationError> {
        let mc_number = McNumber::parse(mc_number)?;

        let snapshot = self
            .registry
            .find_by_mc_number(&mc_number)
            .await
            .inspect_err(|e| warn!(mc_number = %mc_number, error = %e, "Carrier lookup failed"))?;

        let Some(snapshot) = snapshot else {
            info!(mc_number = %mc_number, "Carrier not found in registry");
            return Ok(CarrierVerification::not_found(&mc_number));
        };

        let verification = CarrierVerification::from_snapshot(&mc_number, snapshot);
        info!(
            mc_number = %mc_number,
            verified = verification.verified,
            "Carrier verification completed"
        );
        Ok(verification)
    }
}
