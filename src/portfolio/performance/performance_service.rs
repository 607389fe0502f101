use log::debug;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::constants::PERCENT_DECIMAL_PRECISION;
use crate::market_data::PriceSeries;
use crate::portfolio::performance::{NormalizedPoint, PerformanceSummary};
use crate::portfolio::valuation::ChartDataPoint;

const TRADING_DAYS_PER_YEAR: u32 = 252;
const SQRT_TRADING_DAYS_APPROX: Decimal = dec!(15.874507866); // sqrt(252)
const HUNDRED: Decimal = dec!(100);

/// Re-expresses a benchmark price series as percent change from its value
/// at `window_start_ms`, sampled on `points` evenly spaced timestamps
/// (both window endpoints included).
///
/// An empty series or a non-positive start price yields an empty result;
/// the benchmark simply does not render.
pub fn normalize_benchmark(
    prices: &PriceSeries,
    window_start_ms: i64,
    window_end_ms: i64,
    points: usize,
) -> Vec<NormalizedPoint> {
    let start_price = match prices.value_at(window_start_ms) {
        Ok(price) => price,
        Err(_) => return Vec::new(),
    };
    if start_price <= Decimal::ZERO {
        debug!(
            "Benchmark start price {} at {} is not positive. Skipping normalization.",
            start_price, window_start_ms
        );
        return Vec::new();
    }

    let points = points.max(2);
    let span = window_end_ms - window_start_ms;
    let mut normalized = Vec::with_capacity(points);
    for index in 0..points {
        let timestamp = window_start_ms + span * index as i64 / (points - 1) as i64;
        let price = match prices.value_at(timestamp) {
            Ok(price) => price,
            Err(_) => continue,
        };
        let percent = (price - start_price) / start_price * HUNDRED;
        normalized.push(NormalizedPoint {
            timestamp,
            value: percent.round_dp(PERCENT_DECIMAL_PRECISION),
        });
    }
    normalized
}

/// The portfolio's own normalized return, from its valuation series.
///
/// Baselined on the first point with nonzero market value so a window that
/// starts before the first acquisition does not show a spurious jump from
/// a zero baseline. Points before the baseline read 0%. A series that
/// never holds value yields an empty result.
pub fn portfolio_percent_series(series: &[ChartDataPoint]) -> Vec<NormalizedPoint> {
    let baseline_index = match series
        .iter()
        .position(|point| !point.total_value.is_zero())
    {
        Some(index) => index,
        None => return Vec::new(),
    };
    let baseline = series[baseline_index].total_value;

    series
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let percent = if index < baseline_index {
                Decimal::ZERO
            } else {
                (point.total_value - baseline) / baseline * HUNDRED
            };
            NormalizedPoint {
                timestamp: point.timestamp,
                value: percent.round_dp(PERCENT_DECIMAL_PRECISION),
            }
        })
        .collect()
}

/// Resamples an already-normalized series onto another grid by linear
/// interpolation, for cursor readouts that compare two series point by
/// point. Flat extrapolation outside the sampled span.
pub fn resample_onto_grid(points: &[NormalizedPoint], grid: &[i64]) -> Vec<NormalizedPoint> {
    if points.is_empty() {
        return Vec::new();
    }
    grid.iter()
        .map(|&timestamp| NormalizedPoint {
            timestamp,
            value: percent_at(points, timestamp),
        })
        .collect()
}

/// Portfolio-minus-benchmark percent deltas on the portfolio's grid.
pub fn outperformance(
    portfolio: &[NormalizedPoint],
    benchmark: &[NormalizedPoint],
) -> Vec<NormalizedPoint> {
    if portfolio.is_empty() || benchmark.is_empty() {
        return Vec::new();
    }
    let grid: Vec<i64> = portfolio.iter().map(|point| point.timestamp).collect();
    let resampled = resample_onto_grid(benchmark, &grid);
    portfolio
        .iter()
        .zip(resampled)
        .map(|(own, other)| NormalizedPoint {
            timestamp: own.timestamp,
            value: (own.value - other.value).round_dp(PERCENT_DECIMAL_PRECISION),
        })
        .collect()
}

/// Headline summary from a generated valuation series.
pub fn summarize(series: &[ChartDataPoint]) -> PerformanceSummary {
    let last = match series.last() {
        Some(point) => point,
        None => return PerformanceSummary::default(),
    };

    let gain_loss_amount = last.total_value - last.cost_basis;
    let cumulative_return_percent = if !last.cost_basis.is_zero() {
        Some((gain_loss_amount / last.cost_basis * HUNDRED).round_dp(PERCENT_DECIMAL_PRECISION))
    } else if gain_loss_amount.is_zero() {
        Some(Decimal::ZERO)
    } else {
        None
    };

    PerformanceSummary {
        total_value: last.total_value,
        invested_capital: last.cost_basis,
        gain_loss_amount,
        cumulative_return_percent,
    }
}

/// Annualized volatility of a normalized percent series: sample standard
/// deviation of the period-over-period returns, scaled by sqrt(252).
pub fn annualized_volatility(points: &[NormalizedPoint]) -> Decimal {
    let returns = period_returns(points);
    if returns.len() < 2 {
        return Decimal::ZERO;
    }

    let count = Decimal::from(returns.len() as u64);
    let mean = returns.iter().sum::<Decimal>() / count;
    let sum_squared_diff: Decimal = returns
        .iter()
        .map(|&r| {
            let diff = r - mean;
            diff * diff
        })
        .sum();
    let variance = sum_squared_diff / (count - Decimal::ONE);
    if variance.is_sign_negative() {
        return Decimal::ZERO;
    }

    let period_volatility = variance.sqrt().unwrap_or(Decimal::ZERO);
    let annualization_factor = Decimal::from(TRADING_DAYS_PER_YEAR)
        .sqrt()
        .unwrap_or(SQRT_TRADING_DAYS_APPROX);

    period_volatility * annualization_factor
}

/// Largest peak-to-trough decline of the growth path implied by a
/// normalized percent series, as a fraction of the peak.
pub fn max_drawdown(points: &[NormalizedPoint]) -> Decimal {
    let mut peak = Decimal::ZERO;
    let mut max_drawdown = Decimal::ZERO;

    for point in points {
        let growth = Decimal::ONE + point.value / HUNDRED;
        peak = peak.max(growth);
        if !peak.is_zero() {
            let drawdown = (peak - growth) / peak;
            max_drawdown = max_drawdown.max(drawdown);
        }
    }

    max_drawdown.max(Decimal::ZERO)
}

fn period_returns(points: &[NormalizedPoint]) -> Vec<Decimal> {
    points
        .windows(2)
        .filter_map(|pair| {
            let prev_growth = Decimal::ONE + pair[0].value / HUNDRED;
            let curr_growth = Decimal::ONE + pair[1].value / HUNDRED;
            if prev_growth.is_zero() {
                None
            } else {
                Some(curr_growth / prev_growth - Decimal::ONE)
            }
        })
        .collect()
}

/// Interpolated percent value at `timestamp`, mirroring the price-series
/// lookup contract on an already-normalized series.
fn percent_at(points: &[NormalizedPoint], timestamp: i64) -> Decimal {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Decimal::ZERO,
    };
    if timestamp <= first.timestamp {
        return first.value;
    }
    if timestamp >= last.timestamp {
        return last.value;
    }

    match points.binary_search_by_key(&timestamp, |point| point.timestamp) {
        Ok(index) => points[index].value,
        Err(index) => {
            let before = &points[index - 1];
            let after = &points[index];
            let span = Decimal::from(after.timestamp - before.timestamp);
            let offset = Decimal::from(timestamp - before.timestamp);
            before.value + (after.value - before.value) * offset / span
        }
    }
}
