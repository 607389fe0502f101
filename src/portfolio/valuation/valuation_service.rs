use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::assets::Asset;
use crate::constants::{DECIMAL_PRECISION, QUANTITY_THRESHOLD};
use crate::fx::ExchangeRateTable;
use crate::portfolio::ledger::reconstruct_holding_at;
use crate::portfolio::valuation::ChartDataPoint;

/// Reconstructs a portfolio's value history across `[window_start,
/// window_end]` as `steps + 1` evenly spaced points in the display
/// currency.
///
/// Per timestamp and asset: ledger replay for quantity and invested
/// capital, market value from the asset's price history (or the synthetic
/// price policy when it has none), and conversion through the historical
/// rate for that date. An asset not yet acquired, or fully disposed of,
/// contributes nothing at that instant.
///
/// Every input produces a well-formed series. An inverted window is
/// clamped to one day, a portfolio that was never held yields all-zero
/// points.
pub fn generate_valuation_series(
    assets: &[Asset],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    steps: usize,
    display_currency: &str,
    rates: &ExchangeRateTable,
) -> Vec<ChartDataPoint> {
    let window_start = if window_start >= window_end {
        warn!(
            "Window start {} is not before end {}. Clamping to one day.",
            window_start, window_end
        );
        window_end - Duration::days(1)
    } else {
        window_start
    };

    let steps = steps.max(1);
    let start_ms = window_start.timestamp_millis();
    let end_ms = window_end.timestamp_millis();
    let span_ms = end_ms - start_ms;

    // The window's right edge is "now" for the synthetic price policy: the
    // UI always requests windows ending at the present.
    let as_of_ms = end_ms;

    let quantity_threshold = Decimal::from_str(QUANTITY_THRESHOLD).unwrap_or(Decimal::ZERO);

    let mut series = Vec::with_capacity(steps + 1);
    for step in 0..=steps {
        let timestamp = start_ms + span_ms * step as i64 / steps as i64;
        let cutoff = match DateTime::from_timestamp_millis(timestamp) {
            Some(cutoff) => cutoff,
            None => {
                debug!("Skipping unrepresentable grid timestamp {}", timestamp);
                continue;
            }
        };
        let date = cutoff.date_naive();

        let mut point = ChartDataPoint::empty(timestamp);
        for asset in assets {
            let holding = reconstruct_holding_at(asset, cutoff, display_currency, rates);
            if holding.quantity <= quantity_threshold {
                continue;
            }

            let value = if asset.is_cash() {
                // Cash has no price; a unit is worth 1 in its own currency.
                rates.convert_for_date_or_passthrough(
                    holding.quantity,
                    &asset.currency,
                    display_currency,
                    date,
                )
            } else {
                match native_price_at(asset, timestamp, as_of_ms) {
                    Some(price) => rates.convert_for_date_or_passthrough(
                        holding.quantity * price,
                        &asset.currency,
                        display_currency,
                        date,
                    ),
                    None => {
                        debug!(
                            "No price for {} at {}. Position value treated as ZERO.",
                            asset.ticker, timestamp
                        );
                        Decimal::ZERO
                    }
                }
            };

            let value = value.round_dp(DECIMAL_PRECISION);
            let invested = holding.invested_capital.round_dp(DECIMAL_PRECISION);

            point.total_value += value;
            point.cost_basis += invested;
            point.value_breakdown.insert(asset.ticker.clone(), value);
            point.cost_breakdown.insert(asset.ticker.clone(), invested);
        }
        series.push(point);
    }

    series
}

/// Price of one unit of the asset in its native currency at `timestamp`.
fn native_price_at(asset: &Asset, timestamp: i64, as_of_ms: i64) -> Option<Decimal> {
    if let Some(history) = &asset.price_history {
        if let Ok(price) = history.value_at(timestamp) {
            return Some(price);
        }
    }
    synthetic_price_at(asset, timestamp, as_of_ms)
}

/// The synthetic price policy for assets with no usable price history:
/// the current quote from the present onward, otherwise the unit price of
/// the latest transaction at or before `timestamp` (the earliest
/// transaction's price before any exist). A step function over the prices
/// actually recorded, never an interpolation through a gap with no data.
fn synthetic_price_at(asset: &Asset, timestamp: i64, as_of_ms: i64) -> Option<Decimal> {
    if timestamp >= as_of_ms && asset.current_price > Decimal::ZERO {
        return Some(asset.current_price);
    }

    let mut latest_before = None;
    let mut earliest = None;
    for transaction in asset.transactions_by_date() {
        if transaction.unit_price <= Decimal::ZERO {
            continue;
        }
        if earliest.is_none() {
            earliest = Some(transaction.unit_price);
        }
        if transaction.date.timestamp_millis() <= timestamp {
            latest_before = Some(transaction.unit_price);
        } else {
            break;
        }
    }

    latest_before.or(earliest).or_else(|| {
        if asset.current_price > Decimal::ZERO {
            Some(asset.current_price)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::RateSnapshot;
    use crate::transactions::{Transaction, TransactionKind};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn usd_rates() -> ExchangeRateTable {
        let mut current = RateSnapshot::new();
        current.insert("USD".to_string(), dec!(1));
        ExchangeRateTable::from_current(current)
    }

    fn btc_asset() -> Asset {
        let mut asset = Asset::new("BTC", None);
        asset.current_price = dec!(60000);
        asset.transactions = vec![Transaction::new(
            TransactionKind::Deposit,
            dec!(1),
            dec!(20000),
            dec!(20000),
            date(2024, 1, 1),
        )];
        asset
    }

    #[test]
    fn test_synthetic_policy_anchors() {
        let asset = btc_asset();
        let start = date(2024, 1, 1).timestamp_millis();
        let now = date(2024, 7, 1).timestamp_millis();

        // At the purchase instant the only anchor is the purchase price.
        assert_eq!(synthetic_price_at(&asset, start, now), Some(dec!(20000)));
        // Between purchase and now the last recorded price holds.
        let mid = date(2024, 4, 1).timestamp_millis();
        assert_eq!(synthetic_price_at(&asset, mid, now), Some(dec!(20000)));
        // From the present on, the current quote.
        assert_eq!(synthetic_price_at(&asset, now, now), Some(dec!(60000)));
        // Before the first transaction, its price extends backward.
        let before = date(2023, 6, 1).timestamp_millis();
        assert_eq!(synthetic_price_at(&asset, before, now), Some(dec!(20000)));
    }

    #[test]
    fn test_deposit_only_asset_series() {
        let assets = vec![btc_asset()];
        let rates = usd_rates();
        let series = generate_valuation_series(
            &assets,
            date(2024, 1, 1),
            date(2024, 7, 1),
            10,
            "USD",
            &rates,
        );

        assert_eq!(series.len(), 11);
        let first = series.first().unwrap();
        let last = series.last().unwrap();
        assert_eq!(first.total_value, dec!(20000));
        assert_eq!(last.total_value, dec!(60000));
        for point in &series {
            assert_eq!(point.cost_basis, dec!(20000));
        }
        assert_eq!(last.value_breakdown["BTC"], dec!(60000));
    }

    #[test]
    fn test_asset_absent_before_acquisition() {
        let assets = vec![btc_asset()];
        let rates = usd_rates();
        let series = generate_valuation_series(
            &assets,
            date(2023, 1, 1),
            date(2024, 1, 2),
            10,
            "USD",
            &rates,
        );

        let first = series.first().unwrap();
        assert_eq!(first.total_value, Decimal::ZERO);
        assert!(first.value_breakdown.is_empty());
        assert!(first.cost_breakdown.is_empty());
    }

    #[test]
    fn test_cash_asset_values_by_conversion_only() {
        let mut cash = Asset::new("EUR", None);
        cash.transactions = vec![Transaction::new(
            TransactionKind::Deposit,
            dec!(500),
            dec!(500),
            dec!(500),
            date(2024, 1, 1),
        )];

        let mut current = RateSnapshot::new();
        current.insert("USD".to_string(), dec!(1));
        current.insert("EUR".to_string(), dec!(0.92));
        let rates = ExchangeRateTable::from_current(current);

        let series = generate_valuation_series(
            &[cash],
            date(2024, 1, 1),
            date(2024, 2, 1),
            4,
            "EUR",
            &rates,
        );
        for point in &series {
            assert_eq!(point.total_value, dec!(500));
        }
    }

    #[test]
    fn test_empty_portfolio_yields_zero_series() {
        let rates = usd_rates();
        let series = generate_valuation_series(
            &[],
            date(2024, 1, 1),
            date(2024, 2, 1),
            5,
            "USD",
            &rates,
        );
        assert_eq!(series.len(), 6);
        assert!(series.iter().all(|p| p.total_value.is_zero()));
    }

    #[test]
    fn test_inverted_window_is_clamped() {
        let rates = usd_rates();
        let end = date(2024, 1, 1);
        let series = generate_valuation_series(&[], date(2024, 6, 1), end, 4, "USD", &rates);
        assert_eq!(series.len(), 5);
        assert_eq!(
            series.first().unwrap().timestamp,
            (end - Duration::days(1)).timestamp_millis()
        );
        assert_eq!(series.last().unwrap().timestamp, end.timestamp_millis());
    }
}
