//! Domain types for the royalty calculator: the closed vocabularies a request
//! is validated into, and the report produced from it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::fx::RateSource;

use super::royalty_errors::RoyaltyError;

/// Print format of the book.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BookType {
    Paperback,
    Hardcover,
}

impl BookType {
    pub const ALL: [BookType; 2] = [BookType::Paperback, BookType::Hardcover];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookType::Paperback => "paperback",
            BookType::Hardcover => "hardcover",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookType::Paperback => "Paperback",
            BookType::Hardcover => "Hardcover",
        }
    }
}

impl fmt::Display for BookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookType {
    type Err = RoyaltyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "paperback" => Ok(BookType::Paperback),
            "hardcover" => Ok(BookType::Hardcover),
            other => Err(RoyaltyError::invalid(
                "book_type",
                format!("unknown book type '{}'", other),
            )),
        }
    }
}

/// Interior ink of the book.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InteriorType {
    BlackWhite,
    StandardColor,
    PremiumColor,
}

impl InteriorType {
    pub const ALL: [InteriorType; 3] = [
        InteriorType::BlackWhite,
        InteriorType::StandardColor,
        InteriorType::PremiumColor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InteriorType::BlackWhite => "black_white",
            InteriorType::StandardColor => "standard_color",
            InteriorType::PremiumColor => "premium_color",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InteriorType::BlackWhite => "Black & White",
            InteriorType::StandardColor => "Standard Color",
            InteriorType::PremiumColor => "Premium Color",
        }
    }
}

impl fmt::Display for InteriorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteriorType {
    type Err = RoyaltyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "black_white" => Ok(InteriorType::BlackWhite),
            "standard_color" => Ok(InteriorType::StandardColor),
            "premium_color" => Ok(InteriorType::PremiumColor),
            other => Err(RoyaltyError::invalid(
                "interior_type",
                format!("unknown interior type '{}'", other),
            )),
        }
    }
}

/// Amazon storefronts that sell KDP print books.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marketplace {
    #[serde(rename = "Amazon.com")]
    AmazonCom,
    #[serde(rename = "Amazon.co.uk")]
    AmazonCoUk,
    #[serde(rename = "Amazon.de")]
    AmazonDe,
    #[serde(rename = "Amazon.fr")]
    AmazonFr,
    #[serde(rename = "Amazon.es")]
    AmazonEs,
    #[serde(rename = "Amazon.it")]
    AmazonIt,
    #[serde(rename = "Amazon.nl")]
    AmazonNl,
    #[serde(rename = "Amazon.pl")]
    AmazonPl,
    #[serde(rename = "Amazon.se")]
    AmazonSe,
    #[serde(rename = "Amazon.co.jp")]
    AmazonCoJp,
    #[serde(rename = "Amazon.ca")]
    AmazonCa,
    #[serde(rename = "Amazon.com.au")]
    AmazonComAu,
}

impl Marketplace {
    pub const ALL: [Marketplace; 12] = [
        Marketplace::AmazonCom,
        Marketplace::AmazonCoUk,
        Marketplace::AmazonDe,
        Marketplace::AmazonFr,
        Marketplace::AmazonEs,
        Marketplace::AmazonIt,
        Marketplace::AmazonNl,
        Marketplace::AmazonPl,
        Marketplace::AmazonSe,
        Marketplace::AmazonCoJp,
        Marketplace::AmazonCa,
        Marketplace::AmazonComAu,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Marketplace::AmazonCom => "Amazon.com",
            Marketplace::AmazonCoUk => "Amazon.co.uk",
            Marketplace::AmazonDe => "Amazon.de",
            Marketplace::AmazonFr => "Amazon.fr",
            Marketplace::AmazonEs => "Amazon.es",
            Marketplace::AmazonIt => "Amazon.it",
            Marketplace::AmazonNl => "Amazon.nl",
            Marketplace::AmazonPl => "Amazon.pl",
            Marketplace::AmazonSe => "Amazon.se",
            Marketplace::AmazonCoJp => "Amazon.co.jp",
            Marketplace::AmazonCa => "Amazon.ca",
            Marketplace::AmazonComAu => "Amazon.com.au",
        }
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Marketplace {
    type Err = RoyaltyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Marketplace::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                RoyaltyError::invalid("marketplace", format!("unknown marketplace '{}'", wanted))
            })
    }
}

/// Physical page size. Carried through to the report, never priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimSize {
    pub code: &'static str,
    pub label: &'static str,
}

pub const TRIM_SIZES: &[TrimSize] = &[
    TrimSize { code: "5x8", label: "5 x 8 (12.85 x 20.32 cm)" },
    TrimSize { code: "5.25x8", label: "5.25 x 8 (13.34 x 20.32 cm)" },
    TrimSize { code: "5.5x8.5", label: "5.5 x 8.5 (13.97 x 21.59 cm)" },
    TrimSize { code: "6x9", label: "6 x 9 (15.24 x 22.86 cm)" },
    TrimSize { code: "6.14x9.21", label: "6.14 x 9.21 (15.6 x 23.39 cm)" },
    TrimSize { code: "6.69x9.61", label: "6.69 x 9.61 (17.0 x 24.4 cm)" },
    TrimSize { code: "7x10", label: "7 x 10 (17.78 x 25.4 cm)" },
    TrimSize { code: "7.44x9.69", label: "7.44 x 9.69 (18.9 x 24.61 cm)" },
    TrimSize { code: "7.5x9.25", label: "7.5 x 9.25 (19.05 x 23.5 cm)" },
    TrimSize { code: "8x10", label: "8 x 10 (20.32 x 25.4 cm)" },
    TrimSize { code: "8.25x6", label: "8.25 x 6 (20.96 x 15.24 cm)" },
    TrimSize { code: "8.25x8.25", label: "8.25 x 8.25 (20.96 x 20.96 cm)" },
    TrimSize { code: "8.25x11", label: "8.25 x 11 (20.96 x 27.94 cm)" },
    TrimSize { code: "8.5x8.5", label: "8.5 x 8.5 (21.59 x 21.59 cm)" },
    TrimSize { code: "8.5x11", label: "8.5 x 11 (21.59 x 27.94 cm)" },
    TrimSize { code: "8.27x11.69", label: "8.27 x 11.69 (21 x 29.7 cm)" },
];

impl TrimSize {
    pub fn lookup(code: &str) -> Option<TrimSize> {
        let code = code.trim();
        TRIM_SIZES.iter().copied().find(|t| t.code == code)
    }
}

impl Serialize for TrimSize {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

/// A numeric form field that may arrive as a JSON number or as text.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum NumericField {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl NumericField {
    /// Text form used for parsing. Floats use their shortest round-trip form.
    pub fn as_text(&self) -> String {
        match self {
            NumericField::Integer(n) => n.to_string(),
            NumericField::Float(f) => f.to_string(),
            NumericField::Text(s) => s.trim().to_string(),
        }
    }
}

impl From<&str> for NumericField {
    fn from(value: &str) -> Self {
        NumericField::Text(value.to_string())
    }
}

impl From<i64> for NumericField {
    fn from(value: i64) -> Self {
        NumericField::Integer(value)
    }
}

/// Raw calculator submission, exactly as the form layer sends it.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoyaltyInput {
    #[serde(default, alias = "book_type")]
    pub book_type: Option<String>,
    #[serde(default, alias = "interior_type")]
    pub interior_type: Option<String>,
    #[serde(default)]
    pub marketplace: Option<String>,
    #[serde(default, alias = "trim_size")]
    pub trim_size: Option<String>,
    #[serde(default, alias = "page_count")]
    pub page_count: Option<NumericField>,
    #[serde(default, alias = "list_price")]
    pub list_price: Option<NumericField>,
}

/// Validated calculator request.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    pub book_type: BookType,
    pub interior_type: InteriorType,
    pub marketplace: Marketplace,
    pub trim_size: Option<TrimSize>,
    pub page_count: u32,
    pub list_price: Decimal,
}

/// Figures for one marketplace, in that marketplace's currency.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceResult {
    pub marketplace: Marketplace,
    pub currency: String,
    pub symbol: &'static str,
    /// False when no live rate was known and the price was carried over 1:1.
    pub rate_available: bool,
    pub list_price: Decimal,
    pub list_price_formatted: String,
    pub royalty_rate: String,
    pub royalty_rate_value: Decimal,
    pub min_price: String,
    pub min_price_value: Decimal,
    pub printing_cost: String,
    pub estimated_royalty: String,
    pub estimated_royalty_value: Decimal,
}

/// Full calculator output for one request.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationReport {
    pub book_type: &'static str,
    pub interior_type: &'static str,
    pub selected_marketplace: Marketplace,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim_size: Option<TrimSize>,
    pub page_count: u32,
    pub list_price: Decimal,
    pub base_currency: String,
    pub printing_cost_base: Decimal,
    pub exchange_rates: RateSource,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub marketplace_results: Vec<MarketplaceResult>,
}

/// A rejected calculation. Serializes as `{"error": "..."}`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Rejection {
    pub error: String,
    #[serde(skip)]
    pub cause: RoyaltyError,
}

impl From<RoyaltyError> for Rejection {
    fn from(cause: RoyaltyError) -> Self {
        Self {
            error: cause.to_string(),
            cause,
        }
    }
}

/// Either a full report or a single error message; callers branch on `error`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RoyaltyOutcome {
    Calculated(Box<CalculationReport>),
    Rejected(Rejection),
}

impl RoyaltyOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, RoyaltyOutcome::Rejected(_))
    }

    pub fn report(&self) -> Option<&CalculationReport> {
        match self {
            RoyaltyOutcome::Calculated(report) => Some(report),
            RoyaltyOutcome::Rejected(_) => None,
        }
    }

    pub fn error(&self) -> Option<&RoyaltyError> {
        match self {
            RoyaltyOutcome::Calculated(_) => None,
            RoyaltyOutcome::Rejected(rejection) => Some(&rejection.cause),
        }
    }
}

impl From<Result<CalculationReport, RoyaltyError>> for RoyaltyOutcome {
    fn from(result: Result<CalculationReport, RoyaltyError>) -> Self {
        match result {
            Ok(report) => RoyaltyOutcome::Calculated(Box::new(report)),
            Err(e) => RoyaltyOutcome::Rejected(e.into()),
        }
    }
}

/// One entry of a select box.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Everything a form needs to offer valid choices.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorOptions {
    pub book_types: Vec<SelectOption>,
    pub interior_types: Vec<SelectOption>,
    pub marketplaces: Vec<SelectOption>,
    pub trim_sizes: Vec<SelectOption>,
    pub min_page_count: u32,
    pub max_page_count: u32,
}
