pub mod market_data_errors;
pub mod market_data_model;
pub mod market_data_traits;

pub use market_data_errors::MarketDataError;
pub use market_data_model::{PricePoint, PriceSeries};
pub use market_data_traits::{BenchmarkProviderTrait, PriceHistoryProviderTrait};
