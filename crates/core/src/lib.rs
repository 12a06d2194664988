//! KDP Tool Hub Core - royalty engine, reference tables and FX snapshots.
//!
//! This crate holds the business rules of the royalty calculator. It has no
//! I/O of its own: exchange rates come through the
//! [`ExchangeRateProvider`](kdphub_market_data::ExchangeRateProvider) seam.

pub mod constants;
pub mod errors;
pub mod fx;
pub mod royalty;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
