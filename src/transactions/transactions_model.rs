use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

use super::transactions_constants::*;
use super::transactions_errors::{Result, TransactionError};

/// Domain model representing one economic event on one asset.
///
/// Quantity and total cost are stored unsigned; the kind (plus the transfer
/// direction for `TRANSFER`) determines the sign of their effect on holdings
/// and invested capital.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Total cost in the transaction's native currency
    pub total_cost: Decimal,
    pub date: DateTime<Utc>,
    pub tag: Option<String>,
    /// The paired transaction when a BUY/SELL pair represents a single
    /// exchange, or the other side of a transfer.
    pub linked_transaction_id: Option<String>,
    /// Which side of a transfer this portfolio is on. Only meaningful for
    /// `TRANSFER`; absent on legacy data, which is treated as incoming.
    pub transfer_direction: Option<TransferDirection>,
    /// Currency the purchase was originally denominated in, recorded at
    /// entry time together with the rate snapshot below.
    pub purchase_currency: Option<String>,
    /// Exchange-rate snapshot (currency -> rate against the anchor) in
    /// effect when the transaction was created.
    pub rate_snapshot: Option<HashMap<String, Decimal>>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        quantity: Decimal,
        unit_price: Decimal,
        total_cost: Decimal,
        date: DateTime<Utc>,
    ) -> Self {
        Transaction {
            id: Uuid::new_v4().to_string(),
            kind,
            quantity,
            unit_price,
            total_cost,
            date,
            tag: None,
            linked_transaction_id: None,
            transfer_direction: None,
            purchase_currency: None,
            rate_snapshot: None,
        }
    }

    /// Validates the stored-unsigned invariant.
    pub fn validate(&self) -> Result<()> {
        if self.quantity.is_sign_negative() {
            return Err(TransactionError::InvalidData(format!(
                "Transaction {} has negative quantity",
                self.id
            )));
        }
        if self.total_cost.is_sign_negative() {
            return Err(TransactionError::InvalidData(format!(
                "Transaction {} has negative total cost",
                self.id
            )));
        }
        Ok(())
    }

    /// The direction this transaction moves value in, resolved from the
    /// kind. Transfers without a recorded direction default to incoming.
    pub fn polarity(&self) -> KindPolarity {
        kind_polarity(&self.kind, self.transfer_direction.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Buy,
    Sell,
    Deposit,
    Withdrawal,
    Transfer,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Buy => TRANSACTION_KIND_BUY,
            TransactionKind::Sell => TRANSACTION_KIND_SELL,
            TransactionKind::Deposit => TRANSACTION_KIND_DEPOSIT,
            TransactionKind::Withdrawal => TRANSACTION_KIND_WITHDRAWAL,
            TransactionKind::Transfer => TRANSACTION_KIND_TRANSFER,
            TransactionKind::Income => TRANSACTION_KIND_INCOME,
        }
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            TRANSACTION_KIND_BUY => Ok(TransactionKind::Buy),
            TRANSACTION_KIND_SELL => Ok(TransactionKind::Sell),
            TRANSACTION_KIND_DEPOSIT => Ok(TransactionKind::Deposit),
            TRANSACTION_KIND_WITHDRAWAL => Ok(TransactionKind::Withdrawal),
            TRANSACTION_KIND_TRANSFER => Ok(TransactionKind::Transfer),
            TRANSACTION_KIND_INCOME => Ok(TransactionKind::Income),
            other => Err(TransactionError::UnsupportedKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferDirection {
    Incoming,
    Outgoing,
}

/// How one transaction kind affects the running holding state.
///
/// `quantity` is +1/-1. `capital` is +1/0/-1: BUY and SELL carry 0 because
/// they reshuffle capital between already-owned assets and must not count
/// against external cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindPolarity {
    pub quantity: i8,
    pub capital: i8,
}

/// The single polarity table both replay paths dispatch through.
pub fn kind_polarity(
    kind: &TransactionKind,
    transfer_direction: Option<&TransferDirection>,
) -> KindPolarity {
    match kind {
        TransactionKind::Buy => KindPolarity {
            quantity: 1,
            capital: 0,
        },
        TransactionKind::Sell => KindPolarity {
            quantity: -1,
            capital: 0,
        },
        TransactionKind::Deposit | TransactionKind::Income => KindPolarity {
            quantity: 1,
            capital: 1,
        },
        TransactionKind::Withdrawal => KindPolarity {
            quantity: -1,
            capital: -1,
        },
        TransactionKind::Transfer => match transfer_direction {
            Some(TransferDirection::Outgoing) => KindPolarity {
                quantity: -1,
                capital: -1,
            },
            // Destination side, and legacy single-sided transfers.
            Some(TransferDirection::Incoming) | None => KindPolarity {
                quantity: 1,
                capital: 1,
            },
        },
    }
}
