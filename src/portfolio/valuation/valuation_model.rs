use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One reconstructed instant of a portfolio's history.
///
/// Produced fresh per query and handed to the chart layer; never persisted
/// and holds no back-reference to the source assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataPoint {
    pub timestamp: i64,
    /// Aggregate market value in the display currency.
    pub total_value: Decimal,
    /// Aggregate invested capital in the display currency.
    pub cost_basis: Decimal,
    /// Per-asset market values for stacked rendering, keyed by ticker.
    /// Assets not held at this instant are absent.
    pub value_breakdown: HashMap<String, Decimal>,
    /// Per-asset invested capital, keyed by ticker.
    pub cost_breakdown: HashMap<String, Decimal>,
}

impl ChartDataPoint {
    pub fn empty(timestamp: i64) -> Self {
        ChartDataPoint {
            timestamp,
            ..Default::default()
        }
    }
}
