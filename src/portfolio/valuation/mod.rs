pub mod valuation_model;
pub mod valuation_service;

pub use valuation_model::ChartDataPoint;
pub use valuation_service::generate_valuation_series;
