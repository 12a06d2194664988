//! Error types for the market data crate.
//!
//! [`MarketDataError`] covers every way an exchange-rate fetch can fail.
//! Callers decide how to degrade; this crate never substitutes data.

use thiserror::Error;

/// Errors that can occur while fetching exchange rates.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The currency code is not a well-formed ISO 4217 code.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-success status or the transport failed.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned a payload that could not be used.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether the failure is likely to go away on its own.
    ///
    /// Rate fetches are never retried; this only drives log severity.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Network(_) => true,
            Self::ProviderError { .. } => true,
            Self::UnsupportedCurrency(_) | Self::ValidationFailed { .. } => false,
        }
    }
}
