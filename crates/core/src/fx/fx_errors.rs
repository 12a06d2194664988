use kdphub_market_data::MarketDataError;
use thiserror::Error;

/// Errors raised while building an exchange-rate snapshot.
#[derive(Error, Debug)]
pub enum FxError {
    #[error("Exchange rates for {currency} are unavailable: {source}")]
    Unavailable {
        currency: String,
        #[source]
        source: MarketDataError,
    },
}
