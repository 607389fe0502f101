pub mod transactions_constants;
pub mod transactions_errors;
pub mod transactions_model;

pub use transactions_constants::*;
pub use transactions_errors::TransactionError;
pub use transactions_model::{
    kind_polarity, KindPolarity, Transaction, TransactionKind, TransferDirection,
};
