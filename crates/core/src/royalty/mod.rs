//! Royalty module - KDP print royalty and minimum list price across marketplaces.

mod reference_tables;
mod royalty_calculator;
mod royalty_errors;
mod royalty_model;
mod royalty_request;
mod royalty_service;
mod royalty_traits;


pub use reference_tables::{
    currency_symbol, MarketplaceProfile, MarketplaceTable, PrintingCostRule, PrintingCostTable,
    RoyaltyTables,
};
pub use royalty_calculator::{
    format_amount, format_rate, round_currency, PriceCheck, RoyaltyCalculator,
};
pub use royalty_errors::RoyaltyError;
pub use royalty_model::{
    BookType, CalculationReport, CalculationRequest, CalculatorOptions, InteriorType,
    Marketplace, MarketplaceResult, NumericField, Rejection, RoyaltyInput, RoyaltyOutcome,
    SelectOption, TrimSize, TRIM_SIZES,
};
pub use royalty_service::RoyaltyService;
pub use royalty_traits::RoyaltyServiceTrait;
