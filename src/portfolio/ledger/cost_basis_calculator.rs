use chrono::{DateTime, Utc};
use log::warn;
use rust_decimal::Decimal;

use crate::assets::Asset;
use crate::fx::{convert_with_snapshot, ExchangeRateTable};
use crate::portfolio::ledger::HoldingState;
use crate::transactions::Transaction;

/// Replays an asset's transaction ledger up to `cutoff` and returns the
/// cumulative quantity held and externally invested capital in the display
/// currency.
///
/// A pure fold over the date-sorted log: re-running it for a different
/// cutoff never observes mutated state, so callers can evaluate many time
/// steps (or many assets) independently.
///
/// Invested capital tracks external cash flow only. BUY and SELL reshuffle
/// capital between already-owned assets and contribute nothing; DEPOSIT,
/// INCOME and incoming transfers add; WITHDRAWAL and outgoing transfers
/// subtract.
pub fn reconstruct_holding_at(
    asset: &Asset,
    cutoff: DateTime<Utc>,
    display_currency: &str,
    rates: &ExchangeRateTable,
) -> HoldingState {
    let mut state = HoldingState::ZERO;

    for transaction in asset.transactions_by_date() {
        if transaction.date > cutoff {
            break;
        }

        let polarity = transaction.polarity();
        state.quantity += Decimal::from(i64::from(polarity.quantity)) * transaction.quantity;

        if polarity.capital != 0 {
            let contribution = capital_contribution(transaction, asset, display_currency, rates);
            state.invested_capital += Decimal::from(i64::from(polarity.capital)) * contribution;
        }
    }

    state
}

/// A transaction's total cost in the display currency.
///
/// Prefers the purchase currency and rate snapshot recorded when the
/// transaction was entered. Transactions predating rate-snapshot tracking
/// convert their native total cost at the current rate instead, an accepted
/// approximation for legacy data.
fn capital_contribution(
    transaction: &Transaction,
    asset: &Asset,
    display_currency: &str,
    rates: &ExchangeRateTable,
) -> Decimal {
    if let (Some(purchase_currency), Some(snapshot)) = (
        transaction.purchase_currency.as_deref(),
        transaction.rate_snapshot.as_ref(),
    ) {
        match convert_with_snapshot(
            transaction.total_cost,
            purchase_currency,
            display_currency,
            snapshot,
        ) {
            Ok(converted) => return converted,
            Err(e) => {
                warn!(
                    "Recorded rate snapshot on transaction {} cannot convert {}->{}: {}. \
                     Falling back to current rates.",
                    transaction.id, purchase_currency, display_currency, e
                );
            }
        }
    }

    rates.convert_or_passthrough(transaction.total_cost, &asset.currency, display_currency)
}
