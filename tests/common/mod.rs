use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use valora_core::assets::Asset;
use valora_core::fx::{ExchangeRateTable, RateSnapshot};
use valora_core::transactions::{Transaction, TransactionKind};

pub fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn naive(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn snapshot(pairs: &[(&str, Decimal)]) -> RateSnapshot {
    pairs
        .iter()
        .map(|(code, rate)| (code.to_string(), *rate))
        .collect()
}

pub fn rate_table(
    current: &[(&str, Decimal)],
    historical: &[(NaiveDate, &[(&str, Decimal)])],
) -> ExchangeRateTable {
    let history: BTreeMap<NaiveDate, RateSnapshot> = historical
        .iter()
        .map(|(day, rates)| (*day, snapshot(rates)))
        .collect();
    ExchangeRateTable::new(snapshot(current), history)
}

pub fn deposit(
    quantity: Decimal,
    total_cost: Decimal,
    when: DateTime<Utc>,
) -> Transaction {
    let unit_price = if quantity.is_zero() {
        Decimal::ZERO
    } else {
        total_cost / quantity
    };
    Transaction::new(TransactionKind::Deposit, quantity, unit_price, total_cost, when)
}

pub fn asset_with(
    ticker: &str,
    current_price: Decimal,
    transactions: Vec<Transaction>,
) -> Asset {
    let mut asset = Asset::new(ticker, None);
    asset.current_price = current_price;
    asset.transactions = transactions;
    asset
}
