use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::fx_model::RateSnapshot;
use crate::errors::Result;

/// Contract for the FX-rate collaborator.
///
/// The implementation fetches from a third-party rate API with a 24-hour
/// cache; when the API is fully unreachable it serves
/// [`FALLBACK_RATES`](super::fx_model::FALLBACK_RATES) so the engine always
/// receives a resolvable current snapshot.
#[async_trait]
pub trait FxProviderTrait: Send + Sync {
    async fn latest_rates(&self) -> Result<RateSnapshot>;

    /// Historical snapshots covering `[start, end]`, typically the span
    /// from the earliest transaction to today.
    async fn historical_rates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, RateSnapshot>>;
}
