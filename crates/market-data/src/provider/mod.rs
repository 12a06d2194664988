//! Exchange-rate provider abstractions and implementations.
//!
//! This module contains:
//! - The `ExchangeRateProvider` trait that all providers implement
//! - Concrete provider implementations (Frankfurter)

mod traits;

pub mod frankfurter;

pub use traits::ExchangeRateProvider;
