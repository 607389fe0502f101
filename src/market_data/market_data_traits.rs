use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::errors::Result;

/// Contract for the price-fetch collaborators that feed the engine.
///
/// Implementations live with the surrounding application. They are expected
/// to be idempotent and cached with a freshness TTL (shorter for short
/// display windows), to coalesce concurrent requests for the same
/// ticker/time-range key, and on fetch failure to return the best available
/// stale value rather than an error — the engine renders a zero/flat series
/// when handed no data.
#[async_trait]
pub trait PriceHistoryProviderTrait: Send + Sync {
    /// Returns `[timestamp_ms, price]` pairs covering the requested range.
    async fn price_history(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<(i64, Decimal)>>;

    async fn current_price(&self, ticker: &str) -> Result<Decimal>;
}

/// Contract for the benchmark-fetch collaborator. Same caching expectations
/// as [`PriceHistoryProviderTrait`], keyed by ticker and time range.
#[async_trait]
pub trait BenchmarkProviderTrait: Send + Sync {
    async fn benchmark_history(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<(i64, Decimal)>>;
}
