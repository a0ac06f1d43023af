//! FMCSA adapter - Implements CarrierRegistryPort using integration_fmcsa

use application::error::ApplicationError;
use application::ports::CarrierRegistryPort;
use async_trait::async_trait;
use domain::{CarrierSnapshot, McNumber};
use integration_fmcsa::{Carrier, CarrierLookup, FmcsaClient, FmcsaConfig, FmcsaError};
use tracing::{debug, instrument};

/// Adapter for the FMCSA QCMobile carrier registry
#[derive(Debug)]
pub struct FmcsaCarrierRegistry {
    client: FmcsaClient,
}

impl FmcsaCarrierRegistry {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: FmcsaConfig) -> Result<Self, ApplicationError> {
        let client =
            FmcsaClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration error to application error
    fn map_error(err: FmcsaError) -> ApplicationError {
        match err {
            FmcsaError::MissingWebKey => ApplicationError::Configuration(err.to_string()),
            FmcsaError::InvalidBaseUrl(_)
            | FmcsaError::Timeout(_)
            | FmcsaError::RequestFailed(_)
            | FmcsaError::HttpStatus { .. }
            | FmcsaError::ParseError(_) => ApplicationError::ExternalService(err.to_string()),
        }
    }

    /// Fill in the registry's missing fields
    fn to_snapshot(carrier: Carrier) -> CarrierSnapshot {
        let defaults = CarrierSnapshot::default();
        CarrierSnapshot {
            allowed_to_operate: carrier
                .allowed_to_operate
                .unwrap_or(defaults.allowed_to_operate),
            status_code: carrier.status_code.unwrap_or_default(),
            legal_name: carrier.legal_name.unwrap_or_default(),
            dba_name: carrier.dba_name.unwrap_or_default(),
            dot_number: carrier.dot_number.unwrap_or_default(),
            street: carrier.phy_street.unwrap_or_default(),
            city: carrier.phy_city.unwrap_or_default(),
            state: carrier.phy_state.unwrap_or_default(),
            zip: carrier.phy_zipcode.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl CarrierRegistryPort for FmcsaCarrierRegistry {
    #[instrument(skip(self), fields(mc_number = %mc_number))]
    async fn find_by_mc_number(
        &self,
        mc_number: &McNumber,
    ) -> Result<Option<CarrierSnapshot>, ApplicationError> {
        let carrier = self
            .client
            .lookup_docket(mc_number.as_str())
            .await
            .map_err(Self::map_error)?;

        debug!(found = carrier.is_some(), "FMCSA lookup finished");
        Ok(carrier.map(Self::to_snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_configuration_error() {
        let err = FmcsaCarrierRegistry::map_error(FmcsaError::MissingWebKey);
        assert!(
            matches!(err, ApplicationError::Configuration(msg) if msg == "FMCSA API key not configured")
        );
    }

    #[test]
    fn upstream_failures_are_external() {
        for err in [
            FmcsaError::Timeout(30),
            FmcsaError::RequestFailed("connection refused".into()),
            FmcsaError::HttpStatus {
                status: 500,
                body: String::new(),
            },
            FmcsaError::ParseError("expected value".into()),
        ] {
            assert!(matches!(
                FmcsaCarrierRegistry::map_error(err),
                ApplicationError::ExternalService(_)
            ));
        }
    }

    #[test]
    fn missing_fields_get_defaults() {
        let snapshot = FmcsaCarrierRegistry::to_snapshot(Carrier::default());
        assert_eq!(snapshot.allowed_to_operate, "N");
        assert_eq!(snapshot.status_code, "");
        assert_eq!(snapshot.legal_name, "");
        assert_eq!(snapshot.zip, "");
    }

    #[test]
    fn present_fields_are_copied() {
        let carrier = Carrier {
            legal_name: Some("ACME TRUCKING LLC".into()),
            allowed_to_operate: Some("Y".into()),
            status_code: Some("A".into()),
            phy_city: Some("SPRINGFIELD".into()),
            phy_zipcode: Some("62701".into()),
            ..Carrier::default()
        };

        let snapshot = FmcsaCarrierRegistry::to_snapshot(carrier);
        assert_eq!(snapshot.legal_name, "ACME TRUCKING LLC");
        assert_eq!(snapshot.allowed_to_operate, "Y");
        assert_eq!(snapshot.city, "SPRINGFIELD");
        assert_eq!(snapshot.zip, "62701");
    }
}
