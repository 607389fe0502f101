use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{MS_PER_DAY, PRICE_HISTORY_MAX_POINTS};
use crate::market_data::market_data_errors::MarketDataError;

/// One observed price for an asset or benchmark at a millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub timestamp: i64,
    pub price: Decimal,
}

/// An immutable, time-sorted price history for one asset or benchmark.
///
/// Samples are deduplicated per calendar day (latest wins) and capped at
/// [`PRICE_HISTORY_MAX_POINTS`], trimming the oldest first. Non-positive
/// prices are dropped on ingestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new() -> Self {
        PriceSeries { points: Vec::new() }
    }

    /// Builds a series from the `[timestamp_ms, price]` pair arrays the
    /// price-fetch collaborators return.
    pub fn from_pairs(pairs: &[(i64, Decimal)]) -> Self {
        let mut series = PriceSeries::new();
        series.merge_pairs(pairs);
        series
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Merges new samples into the series, keeping one sample per calendar
    /// day (incoming samples replace earlier ones for the same day) and
    /// trimming the oldest samples past the cap.
    pub fn merge_pairs(&mut self, pairs: &[(i64, Decimal)]) {
        let mut by_day: BTreeMap<i64, PricePoint> = self
            .points
            .iter()
            .map(|p| (p.timestamp.div_euclid(MS_PER_DAY), *p))
            .collect();

        for &(timestamp, price) in pairs {
            if price <= Decimal::ZERO {
                log::debug!(
                    "Dropping non-positive price sample {} at {}",
                    price,
                    timestamp
                );
                continue;
            }
            let day = timestamp.div_euclid(MS_PER_DAY);
            match by_day.get(&day) {
                Some(existing) if existing.timestamp > timestamp => {}
                _ => {
                    by_day.insert(day, PricePoint { timestamp, price });
                }
            }
        }

        let mut points: Vec<PricePoint> = by_day.into_values().collect();
        if points.len() > PRICE_HISTORY_MAX_POINTS {
            let excess = points.len() - PRICE_HISTORY_MAX_POINTS;
            points.drain(..excess);
        }
        self.points = points;
    }

    /// Point-in-time price lookup.
    ///
    /// Flat extrapolation outside the sampled span, linear interpolation
    /// between the bracketing samples inside it.
    pub fn value_at(&self, timestamp: i64) -> Result<Decimal, MarketDataError> {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(MarketDataError::NoData("price series is empty".to_string())),
        };

        if timestamp <= first.timestamp {
            return Ok(first.price);
        }
        if timestamp >= last.timestamp {
            return Ok(last.price);
        }

        match self
            .points
            .binary_search_by_key(&timestamp, |p| p.timestamp)
        {
            Ok(index) => Ok(self.points[index].price),
            Err(index) => {
                // Bracketing pair exists: timestamp is strictly inside the span.
                let before = &self.points[index - 1];
                let after = &self.points[index];
                let span = Decimal::from(after.timestamp - before.timestamp);
                let offset = Decimal::from(timestamp - before.timestamp);
                Ok(before.price + (after.price - before.price) * offset / span)
            }
        }
    }
}
