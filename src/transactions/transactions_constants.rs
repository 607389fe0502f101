//! Transaction kinds
//!
//! Each constant is the string the surrounding app stores for one economic
//! event category. Sign and cost-basis effect are derived from the kind,
//! never stored on the transaction itself.

/// Purchase of an asset funded from already-owned capital. Increases quantity.
pub const TRANSACTION_KIND_BUY: &str = "BUY";

/// Disposal of an asset into already-owned capital. Decreases quantity.
pub const TRANSACTION_KIND_SELL: &str = "SELL";

/// New external value entering a portfolio. Increases quantity and invested capital.
pub const TRANSACTION_KIND_DEPOSIT: &str = "DEPOSIT";

/// Value leaving a portfolio for the outside. Decreases quantity and invested capital.
pub const TRANSACTION_KIND_WITHDRAWAL: &str = "WITHDRAWAL";

/// One side of a move between two portfolios. Recorded as two linked
/// transactions, one per affected portfolio, each carrying its direction.
pub const TRANSACTION_KIND_TRANSFER: &str = "TRANSFER";

/// Dividend, interest, staking reward or similar. Increases quantity and invested capital.
pub const TRANSACTION_KIND_INCOME: &str = "INCOME";
