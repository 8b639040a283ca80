use crate::value_objects::ticker_metrics::TickerMetrics;

/// Header names of the accuracy summary table, matched exactly.
pub mod columns {
    pub const TICKER: &str = "Ticker";
    pub const SAMPLES: &str = "samples";
    pub const DIRECTION_ACCURACY: &str = "direction_accuracy";
    pub const AVG_HIERARCHICAL_SCORE: &str = "avg_hierarchical_score";

    pub const REQUIRED: [&str; 4] = [TICKER, SAMPLES, DIRECTION_ACCURACY, AVG_HIERARCHICAL_SCORE];
}

/// One coerced row of the accuracy summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// Raw `Ticker` cell, never trimmed.
    pub ticker: String,
    /// 1-based line in the source file.
    pub line: u64,
    pub metrics: TickerMetrics,
}
