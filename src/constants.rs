/// Currency every rate snapshot is expressed against
pub const ANCHOR_CURRENCY: &str = "USD";

/// Number of evenly spaced steps in a generated valuation series
pub const CHART_STEPS: usize = 150;

/// Maximum number of samples retained in a price history (oldest trimmed first)
pub const PRICE_HISTORY_MAX_POINTS: usize = 2000;

/// Decimal precision for valuation calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for percent values handed to charts
pub const PERCENT_DECIMAL_PRECISION: u32 = 4;

/// Quantity threshold below which a holding is treated as fully disposed
pub const QUANTITY_THRESHOLD: &str = "0.00000001";

/// Milliseconds in one day, the resolution price samples are deduplicated at
pub const MS_PER_DAY: i64 = 86_400_000;
