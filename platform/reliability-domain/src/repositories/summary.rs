use crate::error::ExportError;
use crate::value_objects::summary_row::SummaryRow;
use std::path::Path;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SummaryReport {
    pub rows: usize,
    /// Header columns that are not part of the projection.
    pub ignored_columns: Vec<String>,
}

/// Source of coerced accuracy-summary rows, in file order.
pub trait SummaryReader {
    fn load_summary(&self, path: &Path) -> Result<(Vec<SummaryRow>, SummaryReport), ExportError>;
}
