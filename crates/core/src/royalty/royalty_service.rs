use async_trait::async_trait;
use std::sync::Arc;

use crate::constants::{MAX_PAGE_COUNT, MIN_PAGE_COUNT};
use crate::fx::FxSnapshotService;

use super::reference_tables::RoyaltyTables;
use super::royalty_calculator::RoyaltyCalculator;
use super::royalty_errors::RoyaltyError;
use super::royalty_model::{
    BookType, CalculationReport, CalculationRequest, CalculatorOptions, InteriorType,
    RoyaltyInput, RoyaltyOutcome, SelectOption, TRIM_SIZES,
};
use super::royalty_traits::RoyaltyServiceTrait;

/// Royalty calculator wired to live exchange rates.
#[derive(Clone)]
pub struct RoyaltyService {
    tables: Arc<RoyaltyTables>,
    fx: FxSnapshotService,
}

impl RoyaltyService {
    pub fn new(tables: Arc<RoyaltyTables>, fx: FxSnapshotService) -> Self {
        Self { tables, fx }
    }

    pub fn tables(&self) -> &RoyaltyTables {
        &self.tables
    }

    /// Same pipeline as [`RoyaltyServiceTrait::calculate`] with the error kept typed.
    ///
    /// Rates are only fetched once the minimum-price gate has passed.
    pub async fn try_calculate(
        &self,
        input: &RoyaltyInput,
    ) -> Result<CalculationReport, RoyaltyError> {
        let request = CalculationRequest::parse(input, &self.tables.marketplaces)?;
        let calculator = RoyaltyCalculator::new(&self.tables);
        let check = calculator.check_minimum_price(&request)?;

        let snapshot = self.fx.snapshot_or_identity(&check.currency).await;
        calculator.calculate(&request, &snapshot)
    }
}

#[async_trait]
impl RoyaltyServiceTrait for RoyaltyService {
    async fn calculate(&self, input: RoyaltyInput) -> RoyaltyOutcome {
        let result = self.try_calculate(&input).await;
        match &result {
            Ok(report) => log::debug!(
                "Royalty calculated for {} at {} {} ({} marketplaces)",
                report.selected_marketplace,
                report.list_price,
                report.base_currency,
                report.marketplace_results.len()
            ),
            Err(e) if e.is_user_facing() => log::debug!("Royalty request rejected: {}", e),
            Err(e) => log::error!("Royalty calculation failed: {}", e),
        }
        result.into()
    }

    fn options(&self) -> CalculatorOptions {
        CalculatorOptions {
            book_types: BookType::ALL
                .iter()
                .map(|b| SelectOption::new(b.as_str(), b.label()))
                .collect(),
            interior_types: InteriorType::ALL
                .iter()
                .map(|i| SelectOption::new(i.as_str(), i.label()))
                .collect(),
            marketplaces: self
                .tables
                .marketplaces
                .profiles()
                .iter()
                .map(|p| SelectOption::new(p.marketplace.as_str(), p.display_label()))
                .collect(),
            trim_sizes: TRIM_SIZES
                .iter()
                .map(|t| SelectOption::new(t.code, t.label))
                .collect(),
            min_page_count: MIN_PAGE_COUNT,
            max_page_count: MAX_PAGE_COUNT,
        }
    }
}
