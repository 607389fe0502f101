use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;

use super::fx_errors::FxError;
use super::fx_model::{resolve_peg, ExchangeRateTable, RateSnapshot};

/// Converts an amount between two currencies using one rate snapshot,
/// routing through the anchor currency: `amount / rate[from] * rate[to]`.
///
/// Identity conversions return the amount untouched, with no rounding.
pub fn convert_with_snapshot(
    amount: Decimal,
    from_currency: &str,
    to_currency: &str,
    snapshot: &RateSnapshot,
) -> Result<Decimal, FxError> {
    let from = resolve_peg(from_currency);
    let to = resolve_peg(to_currency);

    if from == to {
        return Ok(amount);
    }

    let rate_from = snapshot
        .get(from)
        .ok_or_else(|| FxError::RateNotFound(format!("No rate for {}", from)))?;
    let rate_to = snapshot
        .get(to)
        .ok_or_else(|| FxError::RateNotFound(format!("No rate for {}", to)))?;

    if rate_from.is_zero() {
        return Err(FxError::InvalidRate(format!("Zero rate for {}", from)));
    }

    Ok(amount / rate_from * rate_to)
}

impl ExchangeRateTable {
    /// Converts using the current snapshot.
    pub fn convert(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Decimal, FxError> {
        convert_with_snapshot(amount, from_currency, to_currency, &self.current)
    }

    /// Converts using the rate that was in effect on `date`: the snapshot
    /// for that exact date, else the nearest earlier date, else the current
    /// snapshot.
    pub fn convert_for_date(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        date: NaiveDate,
    ) -> Result<Decimal, FxError> {
        let snapshot = self.snapshot_for_date(date).unwrap_or(&self.current);
        convert_with_snapshot(amount, from_currency, to_currency, snapshot)
    }

    /// Fail-safe conversion: on a missing rate the original amount passes
    /// through unconverted, logged as a data-quality signal. The engine's
    /// replay and valuation paths all convert through here so a gap in the
    /// rate tables degrades a number instead of interrupting a render.
    pub fn convert_or_passthrough(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Decimal {
        match self.convert(amount, from_currency, to_currency) {
            Ok(converted) => converted,
            Err(e) => {
                warn!(
                    "Conversion {}->{} failed: {}. Using unconverted amount.",
                    from_currency, to_currency, e
                );
                amount
            }
        }
    }

    /// Date-aware counterpart of [`convert_or_passthrough`].
    ///
    /// [`convert_or_passthrough`]: ExchangeRateTable::convert_or_passthrough
    pub fn convert_for_date_or_passthrough(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        date: NaiveDate,
    ) -> Decimal {
        match self.convert_for_date(amount, from_currency, to_currency, date) {
            Ok(converted) => converted,
            Err(e) => {
                warn!(
                    "Conversion {}->{} on {} failed: {}. Using unconverted amount.",
                    from_currency, to_currency, date, e
                );
                amount
            }
        }
    }

    /// The snapshot for `date`, or the nearest earlier one.
    fn snapshot_for_date(&self, date: NaiveDate) -> Option<&RateSnapshot> {
        self.historical
            .range(..=date)
            .next_back()
            .map(|(_, snapshot)| snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn snapshot(pairs: &[(&str, Decimal)]) -> RateSnapshot {
        pairs
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect()
    }

    fn test_table() -> ExchangeRateTable {
        let current = snapshot(&[
            ("USD", dec!(1)),
            ("EUR", dec!(0.92)),
            ("CHF", dec!(0.88)),
        ]);
        let mut historical = BTreeMap::new();
        historical.insert(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            snapshot(&[("USD", dec!(1)), ("EUR", dec!(0.90))]),
        );
        historical.insert(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            snapshot(&[("USD", dec!(1)), ("EUR", dec!(0.91))]),
        );
        ExchangeRateTable::new(current, historical)
    }

    #[test]
    fn test_same_currency_conversion() {
        let table = test_table();
        let amount = dec!(123.456789);
        assert_eq!(table.convert(amount, "EUR", "EUR").unwrap(), amount);
    }

    #[test]
    fn test_anchor_routed_conversion() {
        let table = test_table();
        assert_eq!(table.convert(dec!(1000), "USD", "EUR").unwrap(), dec!(920));
        // EUR -> CHF routes through USD.
        let converted = table.convert(dec!(92), "EUR", "CHF").unwrap();
        assert_eq!(converted, dec!(88));
    }

    #[test]
    fn test_round_trip_approximates_identity() {
        let table = test_table();
        let amount = dec!(250);
        let there = table.convert(amount, "USD", "CHF").unwrap();
        let back = table.convert(there, "CHF", "USD").unwrap();
        assert!((back - amount).abs() < dec!(0.000001));
    }

    #[test]
    fn test_missing_rate_fails() {
        let table = test_table();
        assert!(matches!(
            table.convert(dec!(1), "USD", "GBP"),
            Err(FxError::RateNotFound(_))
        ));
    }

    #[test]
    fn test_passthrough_on_missing_rate() {
        let table = test_table();
        assert_eq!(
            table.convert_or_passthrough(dec!(42), "USD", "GBP"),
            dec!(42)
        );
    }

    #[test]
    fn test_stablecoin_resolves_through_peg() {
        let table = test_table();
        assert_eq!(table.convert(dec!(100), "USDT", "EUR").unwrap(), dec!(92));
        // USDC -> USD is an identity after peg resolution.
        assert_eq!(table.convert(dec!(100), "USDC", "USD").unwrap(), dec!(100));
    }

    #[test]
    fn test_historical_date_selection() {
        let table = test_table();
        // Exact date.
        let exact = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            table.convert_for_date(dec!(1000), "USD", "EUR", exact).unwrap(),
            dec!(900)
        );
        // Between two entries: nearest earlier wins, not nearest overall.
        let between = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        assert_eq!(
            table
                .convert_for_date(dec!(1000), "USD", "EUR", between)
                .unwrap(),
            dec!(900)
        );
        // After the last entry.
        let after = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            table
                .convert_for_date(dec!(1000), "USD", "EUR", after)
                .unwrap(),
            dec!(910)
        );
    }

    #[test]
    fn test_historical_falls_back_to_current_snapshot() {
        let table = test_table();
        // Before any historical entry exists.
        let early = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        assert_eq!(
            table
                .convert_for_date(dec!(1000), "USD", "EUR", early)
                .unwrap(),
            dec!(920)
        );

        // No historical table at all.
        let current_only =
            ExchangeRateTable::from_current(snapshot(&[("USD", dec!(1)), ("EUR", dec!(0.92))]));
        assert_eq!(
            current_only
                .convert_for_date(dec!(1000), "USD", "EUR", early)
                .unwrap(),
            dec!(920)
        );
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        let zero = snapshot(&[("USD", dec!(0)), ("EUR", dec!(0.92))]);
        let result = convert_with_snapshot(dec!(1), "USD", "EUR", &zero);
        assert!(matches!(result, Err(FxError::InvalidRate(_))));
    }
}
