use crate::error::ExportError;
use crate::value_objects::ticker_metrics::TickerMetrics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ticker -> metrics lookup, serialized as a bare JSON object.
///
/// Keys iterate (and serialize) in ascending byte order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReliabilityTable {
    entries: BTreeMap<String, TickerMetrics>,
}

impl ReliabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites; returns the replaced record, if any.
    pub fn upsert(
        &mut self,
        ticker: impl Into<String>,
        metrics: TickerMetrics,
    ) -> Option<TickerMetrics> {
        self.entries.insert(ticker.into(), metrics)
    }

    pub fn get(&self, ticker: &str) -> Option<&TickerMetrics> {
        self.entries.get(ticker)
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.entries.contains_key(ticker)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Pretty JSON with 2-space indentation and no trailing newline.
    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(|err| ExportError::Serialize(err.to_string()))
    }
}
