pub mod fx_errors;
pub mod fx_model;
pub mod fx_service;
pub mod fx_traits;

pub use fx_errors::FxError;
pub use fx_model::{resolve_peg, ExchangeRateTable, RateSnapshot, FALLBACK_RATES};
pub use fx_service::convert_with_snapshot;
pub use fx_traits::FxProviderTrait;
