//! Boundary validation: turns a raw [`RoyaltyInput`] into a [`CalculationRequest`].

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::constants::{CURRENCY_DECIMAL_PLACES, MAX_PAGE_COUNT, MIN_PAGE_COUNT};
use crate::errors::ValidationError;

use super::reference_tables::MarketplaceTable;
use super::royalty_errors::RoyaltyError;
use super::royalty_model::{
    BookType, CalculationRequest, InteriorType, Marketplace, NumericField, RoyaltyInput, TrimSize,
};

const PRICE_PREFIXES: &[&str] = &["$", "£", "€", "¥", "zł", "kr"];

impl CalculationRequest {
    /// Validates every field; the first offending field is named in the error.
    pub fn parse(input: &RoyaltyInput, marketplaces: &MarketplaceTable) -> Result<Self, RoyaltyError> {
        let book_type: BookType = required_text("book_type", &input.book_type)?.parse()?;
        let interior_type: InteriorType =
            required_text("interior_type", &input.interior_type)?.parse()?;
        let marketplace: Marketplace = required_text("marketplace", &input.marketplace)?.parse()?;
        if marketplaces.get(marketplace).is_none() {
            return Err(RoyaltyError::invalid(
                "marketplace",
                format!("{} is not offered", marketplace),
            ));
        }

        let trim_size = match input.trim_size.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(code) => Some(TrimSize::lookup(code).ok_or_else(|| {
                RoyaltyError::invalid("trim_size", format!("unknown trim size '{}'", code))
            })?),
        };

        let page_count = parse_page_count(required_number("page_count", &input.page_count)?)
            .map_err(|e| RoyaltyError::invalid("page_count", e.to_string()))?;
        let list_price = parse_list_price(required_number("list_price", &input.list_price)?)
            .map_err(|e| RoyaltyError::invalid("list_price", e.to_string()))?;

        Ok(Self {
            book_type,
            interior_type,
            marketplace,
            trim_size,
            page_count,
            list_price,
        })
    }
}

fn required_text<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str, RoyaltyError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(RoyaltyError::invalid(field, "is required")),
    }
}

fn required_number(field: &'static str, value: &Option<NumericField>) -> Result<String, RoyaltyError> {
    let text = value.as_ref().map(NumericField::as_text).unwrap_or_default();
    if text.is_empty() {
        return Err(RoyaltyError::invalid(field, "is required"));
    }
    Ok(text)
}

fn parse_page_count(text: String) -> Result<u32, ValidationError> {
    let pages: i64 = text.parse()?;
    if pages < i64::from(MIN_PAGE_COUNT) || pages > i64::from(MAX_PAGE_COUNT) {
        return Err(ValidationError::InvalidInput(format!(
            "must be between {} and {}, got {}",
            MIN_PAGE_COUNT, MAX_PAGE_COUNT, pages
        )));
    }
    Ok(pages as u32)
}

fn parse_list_price(text: String) -> Result<Decimal, ValidationError> {
    let mut amount = text.trim();
    for prefix in PRICE_PREFIXES {
        if let Some(rest) = amount.strip_prefix(prefix) {
            amount = rest.trim_start();
            break;
        }
    }
    let price = Decimal::from_str(amount)?;
    if price <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "must be positive, got {}",
            price
        )));
    }
    if price.normalize().scale() > CURRENCY_DECIMAL_PLACES {
        return Err(ValidationError::InvalidInput(format!(
            "must have at most {} decimal places, got {}",
            CURRENCY_DECIMAL_PLACES, price
        )));
    }
    Ok(price)
}
