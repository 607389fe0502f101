use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransactionError>;

#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Unsupported transaction kind: {0}")]
    UnsupportedKind(String),

    #[error("Invalid transaction data: {0}")]
    InvalidData(String),
}
