use std::sync::Arc;

use crate::config::Config;
use anyhow::Context;
use kdphub_core::{
    fx::FxSnapshotService,
    royalty::{RoyaltyService, RoyaltyServiceTrait, RoyaltyTables},
};
use kdphub_market_data::{ExchangeRateProvider, FrankfurterProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub royalty_service: Arc<dyn RoyaltyServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("KDP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = FrankfurterProvider::with_config(config.fx_base_url.clone(), config.fx_timeout)
        .context("Failed to build the exchange-rate client")?;
    tracing::info!(
        "Exchange rates from {} (timeout {:?})",
        config.fx_base_url,
        provider.timeout()
    );
    Ok(build_state_with_provider(Arc::new(provider)))
}

/// Wires the calculator around an arbitrary rate provider.
pub fn build_state_with_provider(provider: Arc<dyn ExchangeRateProvider>) -> Arc<AppState> {
    let tables = Arc::new(RoyaltyTables::kdp_defaults());
    let fx_service = FxSnapshotService::new(provider);
    let royalty_service = Arc::new(RoyaltyService::new(tables, fx_service));
    Arc::new(AppState { royalty_service })
}
