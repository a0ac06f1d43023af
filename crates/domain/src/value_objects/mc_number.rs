//! Motor Carrier (MC) number value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A Motor Carrier docket number as supplied by the caller
///
/// Only presence is enforced; the registry is the authority on whether the
/// number exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct McNumber {
    value: String,
}

impl McNumber {
    /// Parse an optional raw MC number
    ///
    /// Surrounding whitespace is removed. Absent or blank input is rejected.
    pub fn parse(raw: Option<&str>) -> Result<Self, DomainError> {
        let value = raw.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Err(DomainError::MissingIdentifier("MC number"));
        }

        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Get the MC number as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for McNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<&str> for McNumber {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(Some(value))
    }
}
