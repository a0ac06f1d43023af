//! Application state shared across handlers

use std::{fmt, sync::Arc};

use application::{CarrierVerificationService, LoadService, ports::DatabaseHealthPort};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Carrier verification against the FMCSA registry
    pub carrier_service: Arc<CarrierVerificationService>,
    /// Load lookup by reference number
    pub load_service: Arc<LoadService>,
    /// Probe used by `/health`
    pub db_health: Arc<dyn DatabaseHealthPort>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("carrier_service", &self.carrier_service)
            .field("load_service", &self.load_service)
            .finish_non_exhaustive()
    }
}
