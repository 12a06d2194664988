//! Frankfurter provider for daily reference exchange rates.
//!
//! Frankfurter publishes the European Central Bank reference rates and needs
//! no API key. One call to `/latest?from=XXX` returns every rate against the
//! requested base:
//!
//! ```text
//! {"amount":1.0,"base":"USD","date":"2024-05-10","rates":{"EUR":0.928,"GBP":0.798}}
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{is_currency_code, LatestRates};
use crate::provider::ExchangeRateProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "FRANKFURTER";

/// Public Frankfurter endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

/// Upper bound for a single rate request
pub const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// API response from Frankfurter
#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    /// Publication date of the rates
    date: Option<NaiveDate>,
    /// Currency code -> units per one base unit
    rates: HashMap<String, f64>,
}

/// Frankfurter exchange-rate provider.
///
/// # Example
///
/// ```ignore
/// use kdphub_market_data::FrankfurterProvider;
///
/// let provider = FrankfurterProvider::new()?;
/// let rates = provider.latest_rates("USD").await?;
/// ```
pub struct FrankfurterProvider {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl FrankfurterProvider {
    /// Create a provider pointed at the public endpoint with the maximum timeout.
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_config(DEFAULT_BASE_URL, MAX_REQUEST_TIMEOUT)
    }

    /// Create a provider for a custom endpoint.
    ///
    /// The timeout is clamped to [`MAX_REQUEST_TIMEOUT`]. Fails when the HTTP
    /// client cannot be built (TLS backend initialisation).
    pub fn with_config(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MarketDataError> {
        let timeout = timeout.min(MAX_REQUEST_TIMEOUT);
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn latest_url(&self, base_currency: &str) -> String {
        format!("{}/latest?from={}", self.base_url, base_currency)
    }

    fn map_transport_error(err: reqwest::Error) -> MarketDataError {
        if err.is_timeout() {
            MarketDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else if err.is_connect() || err.is_request() {
            MarketDataError::Network(err)
        } else {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Converts the provider's float rates, dropping anything unusable.
    fn convert_rates(raw: HashMap<String, f64>) -> HashMap<String, Decimal> {
        let mut rates = HashMap::with_capacity(raw.len());
        for (currency, value) in raw {
            if !value.is_finite() || value <= 0.0 {
                log::warn!(
                    "{}: dropping non-positive rate {} for {}",
                    PROVIDER_ID,
                    value,
                    currency
                );
                continue;
            }
            // Display on f64 yields the shortest round-trip form, so 0.85 stays 0.85.
            match Decimal::from_str(&value.to_string()).or_else(|_| Decimal::try_from(value)) {
                Ok(rate) => {
                    rates.insert(currency, rate);
                }
                Err(e) => {
                    log::warn!(
                        "{}: dropping unrepresentable rate {} for {}: {}",
                        PROVIDER_ID,
                        value,
                        currency,
                        e
                    );
                }
            }
        }
        rates
    }
}

#[async_trait]
impl ExchangeRateProvider for FrankfurterProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn latest_rates(&self, base_currency: &str) -> Result<LatestRates, MarketDataError> {
        if !is_currency_code(base_currency) {
            return Err(MarketDataError::UnsupportedCurrency(
                base_currency.to_string(),
            ));
        }

        let url = self.latest_url(base_currency);
        log::debug!("{}: GET {}", PROVIDER_ID, url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let body = response.text().await.map_err(Self::map_transport_error)?;
        let parsed: FrankfurterResponse =
            serde_json::from_str(&body).map_err(|e| MarketDataError::ValidationFailed {
                message: format!("{} returned malformed rates: {}", PROVIDER_ID, e),
            })?;

        let rates = Self::convert_rates(parsed.rates);
        log::debug!(
            "{}: received {} rates for base {}",
            PROVIDER_ID,
            rates.len(),
            base_currency
        );

        Ok(LatestRates {
            base: base_currency.to_string(),
            date: parsed.date,
            rates,
            provider: PROVIDER_ID.into(),
        })
    }
}
