//! KDP Tool Hub Market Data Crate
//!
//! This crate fetches live exchange rates for the royalty calculator.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +----------------------+     +--------------+
//! |  core::fx        | --> | ExchangeRateProvider | --> | LatestRates  |
//! +------------------+     +----------------------+     +--------------+
//!                                   |
//!                                   v
//!                          FrankfurterProvider (HTTP, <= 5s)
//! ```
//!
//! Providers report failures as [`MarketDataError`]. Deciding what to do
//! about a failed fetch belongs to the caller.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{is_currency_code, LatestRates, ProviderId};
pub use provider::frankfurter::FrankfurterProvider;
pub use provider::ExchangeRateProvider;
