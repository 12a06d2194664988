//! Immutable reference data: printing costs and marketplace profiles.
//!
//! Built once at start-up and shared read-only across requests. Custom tables
//! can be injected for tests or alternative price schedules.

use kdphub_market_data::is_currency_code;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{HashMap, HashSet};

use crate::constants::{CURRENCY_DECIMAL_PLACES, MAX_PAGE_COUNT, MAX_PRINTING_COST};
use crate::errors::{Error, Result};

use super::royalty_errors::RoyaltyError;
use super::royalty_model::{BookType, InteriorType, Marketplace};

/// Fixed and per-page printing cost for one (book type, interior) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintingCostRule {
    pub base_cost: Decimal,
    pub per_page_cost: Decimal,
}

impl PrintingCostRule {
    pub const fn new(base_cost: Decimal, per_page_cost: Decimal) -> Self {
        Self {
            base_cost,
            per_page_cost,
        }
    }

    /// `base + pages * per_page`, unrounded.
    pub fn cost_for(&self, page_count: u32) -> Decimal {
        self.base_cost + Decimal::from(page_count) * self.per_page_cost
    }
}

#[derive(Debug, Clone)]
pub struct PrintingCostTable {
    rules: HashMap<(BookType, InteriorType), PrintingCostRule>,
}

impl PrintingCostTable {
    pub fn new<I>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (BookType, InteriorType, PrintingCostRule)>,
    {
        let mut table = HashMap::new();
        for (book_type, interior_type, rule) in rules {
            if rule.base_cost.is_sign_negative() || rule.per_page_cost.is_sign_negative() {
                return Err(Error::InvalidReferenceData(format!(
                    "negative printing cost for {} / {}",
                    book_type, interior_type
                )));
            }
            let max_cost = Decimal::from(MAX_PAGE_COUNT)
                .checked_mul(rule.per_page_cost)
                .and_then(|pages| pages.checked_add(rule.base_cost));
            if !matches!(max_cost, Some(cost) if cost <= MAX_PRINTING_COST) {
                return Err(Error::InvalidReferenceData(format!(
                    "printing cost for {} / {} exceeds {} at {} pages",
                    book_type, interior_type, MAX_PRINTING_COST, MAX_PAGE_COUNT
                )));
            }
            if table.insert((book_type, interior_type), rule).is_some() {
                return Err(Error::InvalidReferenceData(format!(
                    "duplicate printing cost rule for {} / {}",
                    book_type, interior_type
                )));
            }
        }
        Ok(Self { rules: table })
    }

    /// KDP's published print cost schedule.
    pub fn kdp_defaults() -> Self {
        use BookType::*;
        use InteriorType::*;

        let rules = [
            (Paperback, BlackWhite, PrintingCostRule::new(dec!(0.85), dec!(0.010))),
            (Paperback, StandardColor, PrintingCostRule::new(dec!(3.65), dec!(0.07))),
            (Paperback, PremiumColor, PrintingCostRule::new(dec!(3.99), dec!(0.09))),
            (Hardcover, BlackWhite, PrintingCostRule::new(dec!(3.59), dec!(0.012))),
            (Hardcover, StandardColor, PrintingCostRule::new(dec!(5.65), dec!(0.10))),
            (Hardcover, PremiumColor, PrintingCostRule::new(dec!(6.00), dec!(0.12))),
        ];
        Self {
            rules: rules
                .into_iter()
                .map(|(book, interior, rule)| ((book, interior), rule))
                .collect(),
        }
    }

    pub fn rule(&self, book_type: BookType, interior_type: InteriorType) -> Option<&PrintingCostRule> {
        self.rules.get(&(book_type, interior_type))
    }

    /// Printing cost rounded to currency precision.
    ///
    /// The page count is not range-checked here; request validation owns that.
    pub fn resolve(
        &self,
        book_type: BookType,
        interior_type: InteriorType,
        page_count: u32,
    ) -> std::result::Result<Decimal, RoyaltyError> {
        let rule = self
            .rule(book_type, interior_type)
            .ok_or(RoyaltyError::UnknownCostRule {
                book_type,
                interior_type,
            })?;
        Ok(rule.cost_for(page_count).round_dp(CURRENCY_DECIMAL_PLACES))
    }
}

/// Currency and royalty threshold of one storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceProfile {
    pub marketplace: Marketplace,
    pub currency_code: String,
    /// List price, in local currency, from which the higher rate applies.
    pub royalty_threshold: Decimal,
}

impl MarketplaceProfile {
    pub fn new(marketplace: Marketplace, currency_code: &str, royalty_threshold: Decimal) -> Self {
        Self {
            marketplace,
            currency_code: currency_code.to_string(),
            royalty_threshold,
        }
    }

    pub fn symbol(&self) -> &'static str {
        currency_symbol(&self.currency_code)
    }

    /// "Amazon.com (USD)"
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.marketplace, self.currency_code)
    }
}

/// Marketplaces in declaration order. Order is preserved in every report.
#[derive(Debug, Clone)]
pub struct MarketplaceTable {
    profiles: Vec<MarketplaceProfile>,
}

impl MarketplaceTable {
    pub fn new(profiles: Vec<MarketplaceProfile>) -> Result<Self> {
        if profiles.is_empty() {
            return Err(Error::InvalidReferenceData(
                "marketplace table is empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for profile in &profiles {
            if !seen.insert(profile.marketplace) {
                return Err(Error::InvalidReferenceData(format!(
                    "duplicate marketplace {}",
                    profile.marketplace
                )));
            }
            if !is_currency_code(&profile.currency_code) {
                return Err(Error::InvalidReferenceData(format!(
                    "invalid currency code '{}' for {}",
                    profile.currency_code, profile.marketplace
                )));
            }
            if profile.royalty_threshold.is_sign_negative() {
                return Err(Error::InvalidReferenceData(format!(
                    "negative royalty threshold for {}",
                    profile.marketplace
                )));
            }
        }
        Ok(Self { profiles })
    }

    pub fn kdp_defaults() -> Self {
        use Marketplace::*;

        let profiles = vec![
            MarketplaceProfile::new(AmazonCom, "USD", dec!(9.99)),
            MarketplaceProfile::new(AmazonCoUk, "GBP", dec!(7.99)),
            MarketplaceProfile::new(AmazonDe, "EUR", dec!(9.99)),
            MarketplaceProfile::new(AmazonFr, "EUR", dec!(9.99)),
            MarketplaceProfile::new(AmazonEs, "EUR", dec!(9.99)),
            MarketplaceProfile::new(AmazonIt, "EUR", dec!(9.99)),
            MarketplaceProfile::new(AmazonNl, "EUR", dec!(9.99)),
            MarketplaceProfile::new(AmazonPl, "PLN", dec!(40.0)),
            MarketplaceProfile::new(AmazonSe, "SEK", dec!(99.0)),
            MarketplaceProfile::new(AmazonCoJp, "JPY", dec!(1000)),
            MarketplaceProfile::new(AmazonCa, "CAD", dec!(13.99)),
            MarketplaceProfile::new(AmazonComAu, "AUD", dec!(13.99)),
        ];
        Self { profiles }
    }

    pub fn get(&self, marketplace: Marketplace) -> Option<&MarketplaceProfile> {
        self.profiles.iter().find(|p| p.marketplace == marketplace)
    }

    pub fn profiles(&self) -> &[MarketplaceProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// `selected` first, then every other marketplace in declaration order.
    pub fn ordered_from(&self, selected: Marketplace) -> Vec<&MarketplaceProfile> {
        self.get(selected)
            .into_iter()
            .chain(self.profiles.iter().filter(|p| p.marketplace != selected))
            .collect()
    }
}

/// Both reference tables, injected into the calculator.
#[derive(Debug, Clone)]
pub struct RoyaltyTables {
    pub printing_costs: PrintingCostTable,
    pub marketplaces: MarketplaceTable,
}

impl RoyaltyTables {
    pub fn new(printing_costs: PrintingCostTable, marketplaces: MarketplaceTable) -> Self {
        Self {
            printing_costs,
            marketplaces,
        }
    }

    pub fn kdp_defaults() -> Self {
        Self::new(
            PrintingCostTable::kdp_defaults(),
            MarketplaceTable::kdp_defaults(),
        )
    }
}

impl Default for RoyaltyTables {
    fn default() -> Self {
        Self::kdp_defaults()
    }
}

/// Display symbol for a currency; empty when unknown.
pub fn currency_symbol(currency_code: &str) -> &'static str {
    match currency_code {
        "USD" | "CAD" | "AUD" => "$",
        "GBP" => "£",
        "EUR" => "€",
        "PLN" => "zł",
        "SEK" => "kr",
        "JPY" => "¥",
        _ => "",
    }
}
