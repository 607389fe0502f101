use chrono::NaiveDate;
use lazy_static::lazy_static;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One rate snapshot: currency code -> units of that currency per 1 anchor
/// (USD) unit. The anchor itself carries rate 1.
pub type RateSnapshot = HashMap<String, Decimal>;

/// Two views over the same currency set: the current snapshot and a
/// date-indexed history. Historical lookups fall back to the nearest
/// earlier date, then to the current snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateTable {
    pub current: RateSnapshot,
    pub historical: BTreeMap<NaiveDate, RateSnapshot>,
}

impl ExchangeRateTable {
    pub fn new(current: RateSnapshot, historical: BTreeMap<NaiveDate, RateSnapshot>) -> Self {
        ExchangeRateTable {
            current,
            historical,
        }
    }

    /// A table with only a current snapshot, as handed out before any
    /// historical rates have been fetched.
    pub fn from_current(current: RateSnapshot) -> Self {
        ExchangeRateTable {
            current,
            historical: BTreeMap::new(),
        }
    }
}

/// Stablecoins pegged 1:1 to a fiat currency have no FX entries of their
/// own; they resolve through their peg before any rate lookup.
pub fn resolve_peg(currency: &str) -> &str {
    STABLECOIN_PEGS
        .get(currency)
        .copied()
        .unwrap_or(currency)
}

lazy_static! {
    static ref STABLECOIN_PEGS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("USDT", "USD");
        m.insert("USDC", "USD");
        m.insert("DAI", "USD");
        m.insert("BUSD", "USD");
        m.insert("TUSD", "USD");
        m.insert("FDUSD", "USD");
        m.insert("EURT", "EUR");
        m.insert("EURS", "EUR");
        m.insert("EURC", "EUR");
        m
    };

    /// Hardcoded snapshot for the FX collaborator to fall back on when its
    /// rate API is fully unreachable. Never consulted by the engine itself.
    pub static ref FALLBACK_RATES: RateSnapshot = {
        let mut m = HashMap::new();
        m.insert("USD".to_string(), dec!(1));
        m.insert("EUR".to_string(), dec!(0.92));
        m.insert("CHF".to_string(), dec!(0.88));
        m.insert("GBP".to_string(), dec!(0.79));
        m.insert("JPY".to_string(), dec!(155.0));
        m.insert("CAD".to_string(), dec!(1.37));
        m.insert("AUD".to_string(), dec!(1.52));
        m.insert("HKD".to_string(), dec!(7.80));
        m.insert("SGD".to_string(), dec!(1.35));
        m.insert("NZD".to_string(), dec!(1.65));
        m.insert("SEK".to_string(), dec!(10.50));
        m.insert("NOK".to_string(), dec!(10.60));
        m.insert("DKK".to_string(), dec!(6.90));
        m.insert("PLN".to_string(), dec!(3.95));
        m.insert("CZK".to_string(), dec!(23.20));
        m.insert("CNY".to_string(), dec!(7.25));
        m
    };
}
