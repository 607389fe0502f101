pub mod performance_model;
pub mod performance_service;

pub use performance_model::{BenchmarkSeries, NormalizedPoint, PerformanceSummary};
pub use performance_service::{
    annualized_volatility, max_drawdown, normalize_benchmark, outperformance,
    portfolio_percent_series, resample_onto_grid, summarize,
};
