use super::fx_errors::FxError;
use super::fx_model::ExchangeRateSnapshot;
use kdphub_market_data::ExchangeRateProvider;
use std::sync::Arc;

/// Fetches one exchange-rate snapshot per calculation.
///
/// No caching: every call hits the provider once.
#[derive(Clone)]
pub struct FxSnapshotService {
    provider: Arc<dyn ExchangeRateProvider>,
}

impl FxSnapshotService {
    pub fn new(provider: Arc<dyn ExchangeRateProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_id(&self) -> &'static str {
        self.provider.id()
    }

    /// Fetches live rates for `base_currency`, surfacing any failure.
    pub async fn try_fetch(&self, base_currency: &str) -> Result<ExchangeRateSnapshot, FxError> {
        let mut latest = self
            .provider
            .latest_rates(base_currency)
            .await
            .map_err(|source| FxError::Unavailable {
                currency: base_currency.to_string(),
                source,
            })?;

        if latest.base != base_currency {
            log::warn!(
                "{} answered with base {} for a {} request",
                self.provider.id(),
                latest.base,
                base_currency
            );
        }

        latest.base = base_currency.to_string();
        Ok(ExchangeRateSnapshot::from_latest(latest))
    }

    /// Fetches live rates, degrading to an identity-only snapshot on failure.
    ///
    /// The selected marketplace always converts at 1:1 against itself, so its
    /// figures stay correct either way.
    pub async fn snapshot_or_identity(&self, base_currency: &str) -> ExchangeRateSnapshot {
        match self.try_fetch(base_currency).await {
            Ok(snapshot) => snapshot,
            Err(FxError::Unavailable { currency, source }) => {
                if source.is_transient() {
                    log::warn!(
                        "Exchange rates for {} unavailable, using identity rates: {}",
                        currency,
                        source
                    );
                } else {
                    log::error!(
                        "Exchange rates for {} rejected, using identity rates: {}",
                        currency,
                        source
                    );
                }
                ExchangeRateSnapshot::identity(currency, source.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kdphub_market_data::{LatestRates, MarketDataError};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    struct StaticProvider;

    #[async_trait]
    impl ExchangeRateProvider for StaticProvider {
        fn id(&self) -> &'static str {
            "STATIC"
        }

        async fn latest_rates(&self, base: &str) -> Result<LatestRates, MarketDataError> {
            Ok(LatestRates::new(base, "STATIC".into()).with_rate("EUR", dec!(0.5)))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl ExchangeRateProvider for FailingProvider {
        fn id(&self) -> &'static str {
            "FAILING"
        }

        async fn latest_rates(&self, _base: &str) -> Result<LatestRates, MarketDataError> {
            Err(MarketDataError::Timeout {
                provider: "FAILING".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_try_fetch_returns_live_snapshot() {
        let service = FxSnapshotService::new(Arc::new(StaticProvider));
        let snapshot = service.try_fetch("USD").await.unwrap();
        assert_eq!(snapshot.base_currency(), "USD");
        assert_eq!(snapshot.rate_for("USD"), Decimal::ONE);
        assert_eq!(snapshot.rate_for("EUR"), dec!(0.5));
        assert!(!snapshot.is_degraded());
    }

    #[tokio::test]
    async fn test_try_fetch_surfaces_failure() {
        let service = FxSnapshotService::new(Arc::new(FailingProvider));
        let err = service.try_fetch("USD").await.unwrap_err();
        assert!(matches!(err, FxError::Unavailable { ref currency, .. } if currency == "USD"));
    }

    #[tokio::test]
    async fn test_snapshot_or_identity_degrades() {
        let service = FxSnapshotService::new(Arc::new(FailingProvider));
        let snapshot = service.snapshot_or_identity("JPY").await;
        assert!(snapshot.is_degraded());
        assert_eq!(snapshot.base_currency(), "JPY");
        assert_eq!(snapshot.rate_for("JPY"), Decimal::ONE);
        assert!(!snapshot.has_rate("USD"));
    }
}
