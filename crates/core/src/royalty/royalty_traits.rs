use async_trait::async_trait;

use super::royalty_model::{CalculatorOptions, RoyaltyInput, RoyaltyOutcome};

/// Trait defining the contract for the royalty calculator service.
#[async_trait]
pub trait RoyaltyServiceTrait: Send + Sync {
    /// Validates, gates and prices a submission. Never fails: problems come
    /// back as [`RoyaltyOutcome::Rejected`].
    async fn calculate(&self, input: RoyaltyInput) -> RoyaltyOutcome;

    /// Choices a form layer should offer.
    fn options(&self) -> CalculatorOptions;
}
