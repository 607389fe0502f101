use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::market_data::PriceSeries;
use crate::transactions::Transaction;

/// Domain model representing one holding: an instrument (or cash balance)
/// with its transaction ledger and whatever price history has been fetched
/// for it so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub ticker: String,
    pub name: Option<String>,
    /// Native currency, explicit or derived from the ticker.
    pub currency: String,
    pub transactions: Vec<Transaction>,
    /// Sparse, opportunistically populated price history. Absent until the
    /// first successful fetch; the valuation path substitutes the synthetic
    /// price policy while it is.
    pub price_history: Option<PriceSeries>,
    pub current_price: Decimal,
    pub target_allocation: Option<Decimal>,
}

impl Asset {
    pub fn new(ticker: &str, explicit_currency: Option<&str>) -> Self {
        let currency = explicit_currency
            .map(str::to_string)
            .unwrap_or_else(|| derive_native_currency(ticker));
        Asset {
            id: ticker.to_string(),
            ticker: ticker.to_string(),
            currency,
            ..Default::default()
        }
    }

    /// Cash holdings have no market price; one unit is worth 1 in the
    /// asset's own currency by definition.
    pub fn is_cash(&self) -> bool {
        FIAT_CODES.contains(self.ticker.to_uppercase().as_str())
    }

    /// Transactions in replay order. The ledger is stored date-ordered by
    /// the entry forms, but imported data is not guaranteed sorted.
    pub fn transactions_by_date(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by_key(|tx| tx.date);
        sorted
    }
}

/// Derives an asset's native currency from its ticker: known exchange
/// suffixes map to the exchange's currency, bare fiat codes denominate
/// themselves, everything else defaults to USD.
pub fn derive_native_currency(ticker: &str) -> String {
    let upper = ticker.to_uppercase();

    if let Some(captures) = TICKER_SUFFIX.captures(&upper) {
        if let Some(currency) = SUFFIX_CURRENCIES.get(&captures[1]) {
            return currency.to_string();
        }
    }

    if FIAT_CODES.contains(upper.as_str()) {
        return upper;
    }

    "USD".to_string()
}

lazy_static! {
    static ref TICKER_SUFFIX: Regex = Regex::new(r"\.([A-Z]+)$").unwrap();

    static ref SUFFIX_CURRENCIES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("SW", "CHF");
        m.insert("DE", "EUR");
        m.insert("F", "EUR");
        m.insert("PA", "EUR");
        m.insert("MI", "EUR");
        m.insert("AS", "EUR");
        m.insert("L", "GBP");
        m.insert("T", "JPY");
        m.insert("TO", "CAD");
        m.insert("AX", "AUD");
        m.insert("HK", "HKD");
        m
    };

    static ref FIAT_CODES: HashSet<&'static str> = [
        "USD", "EUR", "CHF", "GBP", "JPY", "CAD", "AUD", "HKD", "SGD", "NZD", "SEK", "NOK",
        "DKK", "PLN", "CZK", "CNY",
    ]
    .into_iter()
    .collect();
}
