use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Royalty rate once the list price reaches the marketplace threshold
pub const HIGH_ROYALTY_RATE: Decimal = dec!(0.60);

/// Royalty rate below the marketplace threshold
pub const STANDARD_ROYALTY_RATE: Decimal = dec!(0.50);

/// Decimal places for every currency amount (banker's rounding)
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Smallest page count KDP accepts
pub const MIN_PAGE_COUNT: u32 = 1;

/// Largest page count accepted by the calculator
pub const MAX_PAGE_COUNT: u32 = 8000;

/// Ceiling on a cost rule's price for a book of `MAX_PAGE_COUNT` pages
pub const MAX_PRINTING_COST: Decimal = dec!(1000000);
