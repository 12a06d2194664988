use chrono::NaiveDate;
use kdphub_market_data::LatestRates;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where the rates in a snapshot came from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RateSource {
    /// Rates fetched from a provider for this request.
    #[serde(rename_all = "camelCase")]
    Live {
        provider: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        as_of: Option<NaiveDate>,
    },
    /// The fetch failed; only the base currency's own rate is known.
    #[serde(rename_all = "camelCase")]
    IdentityFallback { reason: String },
}

/// Multiplicative rates from one base currency, valid for a single calculation.
///
/// The base currency always maps to exactly one, whatever the provider sent.
#[derive(Debug, Clone)]
pub struct ExchangeRateSnapshot {
    base_currency: String,
    rates: HashMap<String, Decimal>,
    source: RateSource,
}

impl ExchangeRateSnapshot {
    /// A snapshot that only knows the base currency.
    pub fn identity(base_currency: impl Into<String>, reason: impl Into<String>) -> Self {
        let base_currency = base_currency.into();
        let mut rates = HashMap::new();
        rates.insert(base_currency.clone(), Decimal::ONE);
        Self {
            base_currency,
            rates,
            source: RateSource::IdentityFallback {
                reason: reason.into(),
            },
        }
    }

    pub fn from_latest(latest: LatestRates) -> Self {
        let LatestRates {
            base,
            date,
            mut rates,
            provider,
        } = latest;
        rates.insert(base.clone(), Decimal::ONE);
        Self {
            base_currency: base,
            rates,
            source: RateSource::Live {
                provider: provider.into_owned(),
                as_of: date,
            },
        }
    }

    /// Builds a live snapshot from explicit rates. Mostly useful in tests.
    pub fn from_rates<I, S>(base_currency: &str, provider: &str, rates: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let mut map: HashMap<String, Decimal> =
            rates.into_iter().map(|(c, r)| (c.into(), r)).collect();
        map.insert(base_currency.to_string(), Decimal::ONE);
        Self {
            base_currency: base_currency.to_string(),
            rates: map,
            source: RateSource::Live {
                provider: provider.to_string(),
                as_of: None,
            },
        }
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    pub fn source(&self) -> &RateSource {
        &self.source
    }

    /// Rate from the base currency to `currency`.
    ///
    /// Unknown currencies convert 1:1; use [`has_rate`](Self::has_rate) to tell
    /// a real rate from that fallback.
    pub fn rate_for(&self, currency: &str) -> Decimal {
        self.rates.get(currency).copied().unwrap_or(Decimal::ONE)
    }

    pub fn has_rate(&self, currency: &str) -> bool {
        self.rates.contains_key(currency)
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.source, RateSource::IdentityFallback { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_identity_snapshot_only_knows_base() {
        let snapshot = ExchangeRateSnapshot::identity("GBP", "timeout");
        assert_eq!(snapshot.rate_for("GBP"), Decimal::ONE);
        assert!(snapshot.has_rate("GBP"));
        assert!(!snapshot.has_rate("EUR"));
        assert_eq!(snapshot.rate_for("EUR"), Decimal::ONE);
        assert!(snapshot.is_degraded());
    }

    #[test]
    fn test_from_latest_forces_base_to_one() {
        let latest = LatestRates::new("USD", "TEST".into())
            .with_rate("USD", dec!(0.99))
            .with_rate("EUR", dec!(0.92));
        let snapshot = ExchangeRateSnapshot::from_latest(latest);
        assert_eq!(snapshot.rate_for("USD"), Decimal::ONE);
        assert_eq!(snapshot.rate_for("EUR"), dec!(0.92));
        assert!(!snapshot.is_degraded());
        assert_eq!(
            snapshot.source(),
            &RateSource::Live {
                provider: "TEST".to_string(),
                as_of: None
            }
        );
    }

    #[test]
    fn test_rate_source_serialization() {
        let json = serde_json::to_value(RateSource::IdentityFallback {
            reason: "down".to_string(),
        })
        .unwrap();
        assert_eq!(json["kind"], "identityFallback");
        assert_eq!(json["reason"], "down");
    }
}
