use crate::entities::reliability_table::ReliabilityTable;
use crate::error::ExportError;
use crate::value_objects::summary_row::SummaryRow;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// What to do when a ticker appears on more than one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The row read last overwrites earlier ones.
    #[default]
    LastWins,
    /// A repeated ticker fails the run.
    Reject,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProjectionReport {
    pub rows: usize,
    /// Tickers seen on more than one row, sorted and distinct.
    pub duplicates: Vec<String>,
}

/// Folds rows, in file order, into the reliability lookup.
pub fn project_rows<I>(
    rows: I,
    policy: DuplicatePolicy,
    source: &Path,
) -> Result<(ReliabilityTable, ProjectionReport), ExportError>
where
    I: IntoIterator<Item = SummaryRow>,
{
    let mut table = ReliabilityTable::new();
    let mut first_seen: BTreeMap<String, u64> = BTreeMap::new();
    let mut duplicates: BTreeSet<String> = BTreeSet::new();
    let mut report = ProjectionReport::default();

    for row in rows {
        report.rows += 1;
        if let Some(&first_line) = first_seen.get(&row.ticker) {
            if policy == DuplicatePolicy::Reject {
                return Err(ExportError::DuplicateTicker {
                    path: source.to_path_buf(),
                    ticker: row.ticker,
                    first_line,
                    line: row.line,
                });
            }
            duplicates.insert(row.ticker.clone());
        } else {
            first_seen.insert(row.ticker.clone(), row.line);
        }
        table.upsert(row.ticker, row.metrics);
    }

    report.duplicates = duplicates.into_iter().collect();
    Ok((table, report))
}
