use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::types::ProviderId;

/// Latest exchange rates relative to a base currency.
///
/// `rates[code]` is how many units of `code` one unit of `base` buys.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestRates {
    /// Base currency the rates are quoted against
    pub base: String,

    /// Business day the provider published the rates for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Currency code -> multiplicative rate
    pub rates: HashMap<String, Decimal>,

    /// Provider that produced the rates
    pub provider: ProviderId,
}

impl LatestRates {
    pub fn new(base: impl Into<String>, provider: ProviderId) -> Self {
        Self {
            base: base.into(),
            date: None,
            rates: HashMap::new(),
            provider,
        }
    }

    pub fn with_rate(mut self, currency: impl Into<String>, rate: Decimal) -> Self {
        self.rates.insert(currency.into(), rate);
        self
    }

    pub fn get(&self, currency: &str) -> Option<Decimal> {
        self.rates.get(currency).copied()
    }
}
