use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The reconstructed state of one holding at a cursor time: how much of the
/// asset is held and how much external capital has flowed into it, in the
/// display currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingState {
    pub quantity: Decimal,
    pub invested_capital: Decimal,
}

impl HoldingState {
    pub const ZERO: HoldingState = HoldingState {
        quantity: Decimal::ZERO,
        invested_capital: Decimal::ZERO,
    };
}
