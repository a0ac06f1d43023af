//! Load reference number value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A validated load reference number
///
/// Reference numbers consist of ASCII letters and digits only and are stored
/// upper-cased, so `abc123` and `ABC123` name the same load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferenceNumber {
    value: String,
}

impl ReferenceNumber {
    /// Parse and normalise a reference number
    ///
    /// Surrounding whitespace is not stripped and makes the value invalid.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::MissingIdentifier("Reference number"));
        }

        if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidReferenceNumber(raw.to_string()));
        }

        Ok(Self {
            value: raw.to_ascii_uppercase(),
        })
    }

    /// Parse an optional reference number, rejecting absence
    pub fn parse_optional(raw: Option<&str>) -> Result<Self, DomainError> {
        raw.map_or(
            Err(DomainError::MissingIdentifier("Reference number")),
            Self::parse,
        )
    }

    /// Get the normalised reference number
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for ReferenceNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for ReferenceNumber {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ReferenceNumber> for String {
    fn from(value: ReferenceNumber) -> Self {
        value.value
    }
}
