use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("No price data available: {0}")]
    NoData(String),

    #[error("Invalid price sample: {0}")]
    InvalidSample(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}
