use rust_decimal::Decimal;
use thiserror::Error;

use super::royalty_model::{BookType, InteriorType, Marketplace};

/// User-facing and internal failures of a royalty calculation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoyaltyError {
    /// A request field is missing, malformed, or outside its domain.
    #[error("Invalid input values: {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The list price cannot cover printing at the selected marketplace's rate.
    #[error(
        "The list price for {marketplace} must be at least {min_required_price:.2} {currency} to cover printing costs."
    )]
    MinimumPriceViolation {
        marketplace: Marketplace,
        min_required_price: Decimal,
        currency: String,
    },

    /// The injected cost table has no rule for this combination.
    #[error("No printing cost rule for {book_type} with {interior_type} interior")]
    UnknownCostRule {
        book_type: BookType,
        interior_type: InteriorType,
    },
}

impl RoyaltyError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        RoyaltyError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the request rather than the reference data.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, RoyaltyError::UnknownCostRule { .. })
    }
}
