pub mod assets;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod market_data;
pub mod portfolio;
pub mod transactions;

pub use portfolio::*;
pub use transactions::*;
