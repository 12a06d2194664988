//! FX module - exchange-rate snapshots and the degrade-to-identity policy.

mod fx_errors;
mod fx_model;
mod fx_service;

pub use fx_errors::FxError;
pub use fx_model::{ExchangeRateSnapshot, RateSource};
pub use fx_service::FxSnapshotService;
