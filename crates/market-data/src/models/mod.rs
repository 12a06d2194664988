//! Market data models
//!
//! - `types` - Type aliases for common identifiers (ProviderId) and currency-code checks
//! - `rates` - Latest exchange-rate payload (LatestRates)

mod rates;
mod types;

pub use rates::LatestRates;
pub use types::{is_currency_code, ProviderId};
