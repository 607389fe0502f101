use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::market_data::PriceSeries;

/// One point of a normalized series: percent change from the window
/// baseline at a millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPoint {
    pub timestamp: i64,
    pub value: Decimal,
}

/// A market index the portfolio's return is compared against. The engine
/// consumes the raw prices; the derived normalized series is transient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkSeries {
    pub ticker: String,
    pub name: String,
    pub color: String,
    pub prices: PriceSeries,
}

/// Headline numbers for the current window, derived from the final point
/// of a generated valuation series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub total_value: Decimal,
    pub invested_capital: Decimal,
    pub gain_loss_amount: Decimal,
    /// None when invested capital is zero but a gain exists (undefined).
    pub cumulative_return_percent: Option<Decimal>,
}
