pub mod summary_row;
pub mod ticker_metrics;
