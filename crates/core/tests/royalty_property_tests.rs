//! Property-based integration tests for the royalty engine.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use kdphub_core::fx::ExchangeRateSnapshot;
use kdphub_core::royalty::{
    BookType, CalculationRequest, InteriorType, Marketplace, RoyaltyCalculator, RoyaltyError,
    RoyaltyTables,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

const CURRENCIES: [&str; 8] = ["USD", "GBP", "EUR", "PLN", "SEK", "JPY", "CAD", "AUD"];

// =============================================================================
// Generators
// =============================================================================

fn arb_book_type() -> impl Strategy<Value = BookType> {
    prop_oneof![Just(BookType::Paperback), Just(BookType::Hardcover)]
}

fn arb_interior_type() -> impl Strategy<Value = InteriorType> {
    prop_oneof![
        Just(InteriorType::BlackWhite),
        Just(InteriorType::StandardColor),
        Just(InteriorType::PremiumColor),
    ]
}

fn arb_marketplace() -> impl Strategy<Value = Marketplace> {
    proptest::sample::select(Marketplace::ALL.to_vec())
}

/// Prices from 0.01 to 2000.00 with cent precision.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1i64..=200_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_request() -> impl Strategy<Value = CalculationRequest> {
    (
        arb_book_type(),
        arb_interior_type(),
        arb_marketplace(),
        1u32..=8000,
        arb_price(),
    )
        .prop_map(
            |(book_type, interior_type, marketplace, page_count, list_price)| CalculationRequest {
                book_type,
                interior_type,
                marketplace,
                trim_size: None,
                page_count,
                list_price,
            },
        )
}

/// Rates between 0.0001 and 500.0000 for every known currency.
fn arb_rates() -> impl Strategy<Value = Vec<(&'static str, Decimal)>> {
    proptest::collection::vec(1i64..=5_000_000, CURRENCIES.len()).prop_map(|raw| {
        CURRENCIES
            .iter()
            .zip(raw)
            .map(|(code, n)| (*code, Decimal::new(n, 4)))
            .collect()
    })
}

fn base_currency(tables: &RoyaltyTables, marketplace: Marketplace) -> String {
    tables
        .marketplaces
        .get(marketplace)
        .map(|p| p.currency_code.clone())
        .unwrap_or_default()
}

fn live_snapshot(
    tables: &RoyaltyTables,
    marketplace: Marketplace,
    rates: Vec<(&'static str, Decimal)>,
) -> ExchangeRateSnapshot {
    ExchangeRateSnapshot::from_rates(&base_currency(tables, marketplace), "PROPTEST", rates)
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Same request and snapshot always give the same outcome.
    #[test]
    fn prop_calculation_is_deterministic(request in arb_request(), rates in arb_rates()) {
        let tables = RoyaltyTables::kdp_defaults();
        let calculator = RoyaltyCalculator::new(&tables);
        let snapshot = live_snapshot(&tables, request.marketplace, rates);

        prop_assert_eq!(
            calculator.calculate(&request, &snapshot),
            calculator.calculate(&request, &snapshot)
        );
    }

    /// Raising the list price can only turn a rejection into an acceptance.
    #[test]
    fn prop_gate_is_monotonic(request in arb_request(), bump in arb_price()) {
        let tables = RoyaltyTables::kdp_defaults();
        let calculator = RoyaltyCalculator::new(&tables);
        let mut higher = request.clone();
        higher.list_price += bump;

        let low_ok = calculator.check_minimum_price(&request).is_ok();
        let high_ok = calculator.check_minimum_price(&higher).is_ok();

        prop_assert!(!low_ok || high_ok, "accepted at {} but rejected at {}", request.list_price, higher.list_price);
    }

    /// A list price equal to the reported minimum is accepted.
    #[test]
    fn prop_reported_minimum_is_accepted(request in arb_request()) {
        let tables = RoyaltyTables::kdp_defaults();
        let calculator = RoyaltyCalculator::new(&tables);

        if let Err(RoyaltyError::MinimumPriceViolation { min_required_price, .. }) =
            calculator.check_minimum_price(&request)
        {
            let mut at_minimum = request.clone();
            at_minimum.list_price = min_required_price;
            prop_assert!(calculator.check_minimum_price(&at_minimum).is_ok());
        }
    }

    /// The selected marketplace comes first, converts 1:1, and every marketplace appears once.
    #[test]
    fn prop_selected_first_and_unconverted(request in arb_request(), rates in arb_rates()) {
        let tables = RoyaltyTables::kdp_defaults();
        let calculator = RoyaltyCalculator::new(&tables);
        let snapshot = live_snapshot(&tables, request.marketplace, rates);

        if let Ok(report) = calculator.calculate(&request, &snapshot) {
            let first = &report.marketplace_results[0];
            prop_assert_eq!(first.marketplace, request.marketplace);
            prop_assert_eq!(first.list_price, request.list_price);
            prop_assert!(first.estimated_royalty_value >= Decimal::ZERO);

            let seen: HashSet<Marketplace> =
                report.marketplace_results.iter().map(|r| r.marketplace).collect();
            prop_assert_eq!(seen.len(), Marketplace::ALL.len());
            prop_assert_eq!(report.marketplace_results.len(), Marketplace::ALL.len());
        }
    }

    /// Losing the rate feed never changes the selected marketplace's figures.
    #[test]
    fn prop_identity_fallback_preserves_selected_result(request in arb_request(), rates in arb_rates()) {
        let tables = RoyaltyTables::kdp_defaults();
        let calculator = RoyaltyCalculator::new(&tables);
        let live = live_snapshot(&tables, request.marketplace, rates);
        let identity = ExchangeRateSnapshot::identity(base_currency(&tables, request.marketplace), "offline");

        match (calculator.calculate(&request, &live), calculator.calculate(&request, &identity)) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(&a.marketplace_results[0], &b.marketplace_results[0]);
                for result in &b.marketplace_results {
                    prop_assert_eq!(result.list_price, request.list_price);
                }
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "outcomes diverged: {:?} vs {:?}", a.is_ok(), b.is_ok()),
        }
    }
}
