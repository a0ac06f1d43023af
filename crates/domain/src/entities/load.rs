//! Freight load entity

use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::ReferenceNumber};

/// A freight shipment offered on the load board
///
/// Identified by its [`ReferenceNumber`]. Every text field is required and
/// non-blank; the rate is a finite amount in dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub reference_number: ReferenceNumber,
    pub origin: String,
    pub destination: String,
    pub equipment_type: String,
    pub rate: f64,
    pub commodity: String,
}

impl Load {
    /// Create a validated load
    pub fn new(
        reference_number: ReferenceNumber,
        origin: impl Into<String>,
        destination: impl Into<String>,
        equipment_type: impl Into<String>,
        rate: f64,
        commodity: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let load = Self {
            reference_number,
            origin: origin.into(),
            destination: destination.into(),
            equipment_type: equipment_type.into(),
            rate,
            commodity: commodity.into(),
        };
        load.validate()?;
        Ok(load)
    }

    fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in [
            ("origin", &self.origin),
            ("destination", &self.destination),
            ("equipment_type", &self.equipment_type),
            ("commodity", &self.commodity),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::InvalidLoad(format!(
                    "{field} is empty for {}",
                    self.reference_number
                )));
            }
        }

        if !self.rate.is_finite() {
            return Err(DomainError::InvalidLoad(format!(
                "rate must be a finite number for {}",
                self.reference_number
            )));
        }

        Ok(())
    }
}
