//! Exchange-rate provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::LatestRates;

/// Trait for exchange-rate providers.
///
/// Implement this trait to add support for a new rate source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use kdphub_market_data::{ExchangeRateProvider, LatestRates, MarketDataError};
///
/// struct FixedRates;
///
/// #[async_trait]
/// impl ExchangeRateProvider for FixedRates {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn latest_rates(&self, base: &str) -> Result<LatestRates, MarketDataError> {
///         Ok(LatestRates::new(base, "FIXED".into()))
///     }
/// }
/// ```
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "FRANKFURTER".
    /// Used for logging and for labelling the resulting rates.
    fn id(&self) -> &'static str;

    /// Fetch the latest rates from `base_currency` to every currency the provider knows.
    ///
    /// Performs exactly one outbound request. No caching and no retries.
    async fn latest_rates(&self, base_currency: &str) -> Result<LatestRates, MarketDataError>;
}
