//! Royalty engine: printing cost, minimum-price gate, per-marketplace breakdown.
//!
//! Rounding: every currency amount is rounded to two places with banker's
//! rounding (`Decimal::round_dp`) at the point it is computed: printing cost,
//! minimum price (before the gate compares against it), converted price,
//! per-marketplace minimum and estimated royalty. The list price itself is
//! compared unrounded.
//!
//! The printing cost is computed once in the selected marketplace's currency
//! and reused unconverted for every other marketplace, both for the minimum
//! price and for the royalty. Converting it would change published figures.

use rust_decimal::Decimal;

use crate::constants::{CURRENCY_DECIMAL_PLACES, HIGH_ROYALTY_RATE, STANDARD_ROYALTY_RATE};
use crate::fx::{ExchangeRateSnapshot, RateSource};

use super::reference_tables::{MarketplaceProfile, RoyaltyTables};
use super::royalty_errors::RoyaltyError;
use super::royalty_model::{CalculationReport, CalculationRequest, MarketplaceResult};

/// Outcome of the minimum-price gate for the selected marketplace.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCheck {
    pub printing_cost: Decimal,
    pub royalty_rate: Decimal,
    pub min_required_price: Decimal,
    pub currency: String,
}

/// Pure, synchronous calculator over injected reference tables.
#[derive(Debug, Clone, Copy)]
pub struct RoyaltyCalculator<'a> {
    tables: &'a RoyaltyTables,
}

impl<'a> RoyaltyCalculator<'a> {
    pub fn new(tables: &'a RoyaltyTables) -> Self {
        Self { tables }
    }

    /// 60% at or above the threshold, 50% below it.
    pub fn royalty_rate(list_price: Decimal, threshold: Decimal) -> Decimal {
        if list_price >= threshold {
            HIGH_ROYALTY_RATE
        } else {
            STANDARD_ROYALTY_RATE
        }
    }

    /// Smallest list price whose royalty covers `printing_cost` at `rate`.
    ///
    /// Cost tables cap `printing_cost` at `MAX_PRINTING_COST`, so this cannot overflow.
    pub fn min_list_price(printing_cost: Decimal, rate: Decimal) -> Decimal {
        round_currency(printing_cost / rate)
    }

    fn selected_profile(
        &self,
        request: &CalculationRequest,
    ) -> Result<&'a MarketplaceProfile, RoyaltyError> {
        self.tables
            .marketplaces
            .get(request.marketplace)
            .ok_or_else(|| {
                RoyaltyError::invalid(
                    "marketplace",
                    format!("{} is not offered", request.marketplace),
                )
            })
    }

    /// Runs the minimum-price gate for the selected marketplace.
    pub fn check_minimum_price(
        &self,
        request: &CalculationRequest,
    ) -> Result<PriceCheck, RoyaltyError> {
        let profile = self.selected_profile(request)?;
        let printing_cost = self.tables.printing_costs.resolve(
            request.book_type,
            request.interior_type,
            request.page_count,
        )?;
        let royalty_rate = Self::royalty_rate(request.list_price, profile.royalty_threshold);
        let min_required_price = Self::min_list_price(printing_cost, royalty_rate);

        if request.list_price < min_required_price {
            return Err(RoyaltyError::MinimumPriceViolation {
                marketplace: request.marketplace,
                min_required_price,
                currency: profile.currency_code.clone(),
            });
        }

        Ok(PriceCheck {
            printing_cost,
            royalty_rate,
            min_required_price,
            currency: profile.currency_code.clone(),
        })
    }

    /// Full report for every marketplace, selected marketplace first.
    ///
    /// `snapshot` must be based on the selected marketplace's currency; a
    /// snapshot for any other base is ignored in favour of identity rates.
    pub fn calculate(
        &self,
        request: &CalculationRequest,
        snapshot: &ExchangeRateSnapshot,
    ) -> Result<CalculationReport, RoyaltyError> {
        let check = self.check_minimum_price(request)?;

        let fallback;
        let snapshot = if snapshot.base_currency() == check.currency {
            snapshot
        } else {
            log::error!(
                "Rate snapshot based on {} used for a {} calculation; ignoring it",
                snapshot.base_currency(),
                check.currency
            );
            fallback = ExchangeRateSnapshot::identity(
                check.currency.clone(),
                format!("rates were quoted against {}", snapshot.base_currency()),
            );
            &fallback
        };

        let marketplace_results = self
            .tables
            .marketplaces
            .ordered_from(request.marketplace)
            .into_iter()
            .map(|profile| {
                marketplace_result(profile, request.list_price, check.printing_cost, snapshot)
            })
            .collect::<Result<Vec<MarketplaceResult>, RoyaltyError>>()?;

        let warnings = rate_warnings(snapshot, &marketplace_results);

        Ok(CalculationReport {
            book_type: request.book_type.label(),
            interior_type: request.interior_type.label(),
            selected_marketplace: request.marketplace,
            trim_size: request.trim_size,
            page_count: request.page_count,
            list_price: request.list_price,
            base_currency: check.currency,
            printing_cost_base: check.printing_cost,
            exchange_rates: snapshot.source().clone(),
            warnings,
            marketplace_results,
        })
    }
}

fn marketplace_result(
    profile: &MarketplaceProfile,
    list_price: Decimal,
    printing_cost: Decimal,
    snapshot: &ExchangeRateSnapshot,
) -> Result<MarketplaceResult, RoyaltyError> {
    let currency = profile.currency_code.as_str();
    let symbol = profile.symbol();
    let overflow = || {
        RoyaltyError::invalid(
            "list_price",
            format!("{} is too large to convert into {}", list_price, currency),
        )
    };

    let converted = round_currency(
        list_price
            .checked_mul(snapshot.rate_for(currency))
            .ok_or_else(overflow)?,
    );
    let rate = RoyaltyCalculator::royalty_rate(converted, profile.royalty_threshold);
    let min_price = RoyaltyCalculator::min_list_price(printing_cost, rate);
    // May be negative for marketplaces other than the selected one.
    let estimated_royalty = round_currency(
        converted
            .checked_mul(rate)
            .and_then(|gross| gross.checked_sub(printing_cost))
            .ok_or_else(overflow)?,
    );

    Ok(MarketplaceResult {
        marketplace: profile.marketplace,
        currency: currency.to_string(),
        symbol,
        rate_available: snapshot.has_rate(currency),
        list_price: converted,
        list_price_formatted: format_amount(symbol, converted),
        royalty_rate: format_rate(rate),
        royalty_rate_value: rate,
        min_price: format_amount(symbol, min_price),
        min_price_value: min_price,
        printing_cost: format_amount(symbol, printing_cost),
        estimated_royalty: format_amount(symbol, estimated_royalty),
        estimated_royalty_value: estimated_royalty,
    })
}

fn rate_warnings(snapshot: &ExchangeRateSnapshot, results: &[MarketplaceResult]) -> Vec<String> {
    let mut missing: Vec<&str> = Vec::new();
    for result in results.iter().filter(|r| !r.rate_available) {
        if !missing.contains(&result.currency.as_str()) {
            missing.push(&result.currency);
        }
    }
    if missing.is_empty() {
        return Vec::new();
    }

    let codes = missing.join(", ");
    let message = match snapshot.source() {
        RateSource::IdentityFallback { reason } => format!(
            "Live exchange rates are unavailable ({}); prices in {} are shown unconverted.",
            reason, codes
        ),
        RateSource::Live { provider, .. } => format!(
            "{} returned no rate for {}; those prices are shown unconverted.",
            provider, codes
        ),
    };
    vec![message]
}

/// Rounds to currency precision, half to even.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp(CURRENCY_DECIMAL_PLACES)
}

/// "€ 3.94"; just "3.94" when the currency has no symbol.
pub fn format_amount(symbol: &str, amount: Decimal) -> String {
    let amount = round_currency(amount);
    if symbol.is_empty() {
        format!("{:.2}", amount)
    } else {
        format!("{} {:.2}", symbol, amount)
    }
}

/// 0.60 -> "60%"
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).trunc())
}
