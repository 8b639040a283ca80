use serde::{Deserialize, Serialize};

/// Per-ticker statistics carried into the reliability lookup.
///
/// Field order is the serialized order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickerMetrics {
    pub samples: i64,
    pub direction_accuracy: f64,
    pub avg_hierarchical_score: f64,
}
