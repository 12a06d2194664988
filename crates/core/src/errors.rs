//! Core error types for the KDP tool hub.
//!
//! Request-level failures are `RoyaltyError` and `FxError`, next to their
//! modules. The root [`Error`] covers reference data rejected at start-up.

use std::num::ParseIntError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid reference data: {0}")]
    InvalidReferenceData(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse integer: {0}")]
    IntegerParse(#[from] ParseIntError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn parse_decimal(text: &str) -> std::result::Result<Decimal, ValidationError> {
        Ok(Decimal::from_str(text)?)
    }

    fn parse_integer(text: &str) -> std::result::Result<u32, ValidationError> {
        Ok(text.parse()?)
    }

    #[test]
    fn test_parse_failures_convert_into_validation_errors() {
        assert!(matches!(
            parse_decimal("nine"),
            Err(ValidationError::DecimalParse(_))
        ));
        assert!(matches!(
            parse_integer("12.5"),
            Err(ValidationError::IntegerParse(_))
        ));
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidReferenceData("marketplace table is empty".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid reference data: marketplace table is empty"
        );
        let err = ValidationError::InvalidInput("must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid input: must be positive");
    }
}
