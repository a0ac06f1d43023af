//! Carrier verification result
//!
//! Built fresh for every lookup from the registry's carrier record; never
//! persisted.

use serde::{Deserialize, Serialize};

use crate::value_objects::McNumber;

const MESSAGE_NOT_FOUND: &str = "Carrier not found";
const MESSAGE_VERIFIED: &str = "Carrier verified and active";
const MESSAGE_NOT_VERIFIED: &str = "Carrier not active or not allowed to operate";

/// Status code the registry uses for an active operating authority
const ACTIVE_STATUS: &str = "A";

/// Raw carrier fields as reported by the registry
///
/// Every field is text; absent upstream values are already defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierSnapshot {
    pub allowed_to_operate: String,
    pub status_code: String,
    pub legal_name: String,
    pub dba_name: String,
    pub dot_number: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Default for CarrierSnapshot {
    fn default() -> Self {
        Self {
            allowed_to_operate: "N".to_string(),
            status_code: String::new(),
            legal_name: String::new(),
            dba_name: String::new(),
            dot_number: String::new(),
            street: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
        }
    }
}

/// Physical address of a carrier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Details section of a verification result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierDetails {
    pub mc_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_to_operate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dba_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<CarrierAddress>,
}

/// Normalised outcome of a carrier verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierVerification {
    pub verified: bool,
    pub message: String,
    pub details: CarrierDetails,
}

impl CarrierVerification {
    /// Result for an MC number the registry does not know
    pub fn not_found(mc_number: &McNumber) -> Self {
        Self {
            verified: false,
            message: MESSAGE_NOT_FOUND.to_string(),
            details: CarrierDetails {
                mc_number: mc_number.to_string(),
                allowed_to_operate: None,
                status_code: None,
                legal_name: None,
                dba_name: None,
                dot_number: None,
                address: None,
            },
        }
    }

    /// Interpret a registry record
    ///
    /// A carrier is verified only when it is allowed to operate (`Y`, any
    /// case) and its status code is `A`.
    pub fn from_snapshot(mc_number: &McNumber, snapshot: CarrierSnapshot) -> Self {
        let allowed_to_operate = snapshot.allowed_to_operate.eq_ignore_ascii_case("Y");
        let status_code = snapshot.status_code.to_uppercase();
        let verified = allowed_to_operate && status_code == ACTIVE_STATUS;

        let message = if verified {
            MESSAGE_VERIFIED
        } else {
            MESSAGE_NOT_VERIFIED
        };

        Self {
            verified,
            message: message.to_string(),
            details: CarrierDetails {
                mc_number: mc_number.to_string(),
                allowed_to_operate: Some(allowed_to_operate),
                status_code: Some(status_code),
                legal_name: Some(snapshot.legal_name),
                dba_name: Some(snapshot.dba_name),
                dot_number: Some(snapshot.dot_number),
                address: Some(CarrierAddress {
                    street: snapshot.street,
                    city: snapshot.city,
                    state: snapshot.state,
                    zip: snapshot.zip,
                }),
            },
        }
    }
}
