//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required identifier was absent or blank
    #[error("{0} is required")]
    MissingIdentifier(&'static str),

    /// Reference number contains characters other than ASCII letters and digits
    #[error("Invalid reference number '{0}': only letters and digits are allowed")]
    InvalidReferenceNumber(String),

    /// Load record failed validation
    #[error("Invalid load: {0}")]
    InvalidLoad(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_identifier_message() {
        let err = DomainError::MissingIdentifier("MC number");
        assert_eq!(err.to_string(), "MC number is required");
    }

    #[test]
    fn invalid_reference_number_message() {
        let err = DomainError::InvalidReferenceNumber("AB-1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid reference number 'AB-1': only letters and digits are allowed"
        );
    }

    #[test]
    fn invalid_load_message() {
        let err = DomainError::InvalidLoad("origin is empty".to_string());
        assert_eq!(err.to_string(), "Invalid load: origin is empty");
    }
}
