use crate::config::Config;
use reliability_domain::entities::reliability_table::ReliabilityTable;
use reliability_domain::error::ExportError;
use reliability_domain::repositories::reliability::ReliabilityWriter;
use reliability_domain::repositories::summary::SummaryReader;
use reliability_domain::services::projection::project_rows;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub tickers: usize,
    pub duplicates: Vec<String>,
    pub output_sha256: String,
}

#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub table: ReliabilityTable,
    pub summary: ExportSummary,
}

/// Reads the accuracy summary, projects it into the ticker lookup and writes
/// the lookup as pretty JSON. Nothing is written unless every row coerces.
pub fn transform(
    config: &Config,
    reader: &dyn SummaryReader,
    writer: &dyn ReliabilityWriter,
) -> Result<ExportOutcome, ExportError> {
    let input = config.paths.input_csv.as_path();
    let output = config.paths.output_json.as_path();
    let span = tracing::info_span!(
        "transform",
        input = %input.display(),
        output = %output.display()
    );
    let _guard = span.enter();

    let (rows, read_report) = reader.load_summary(input)?;
    if !read_report.ignored_columns.is_empty() {
        tracing::debug!(columns = ?read_report.ignored_columns, "ignoring extra columns");
    }

    let (table, projection) = project_rows(rows, config.export.duplicate_policy, input)?;
    for ticker in &projection.duplicates {
        tracing::warn!(ticker = %ticker, "duplicate ticker; last row wins");
    }
    metrics::counter!("ticker_reliability.app.transform.rows_total")
        .increment(projection.rows as u64);
    metrics::counter!("ticker_reliability.app.transform.duplicates_total")
        .increment(projection.duplicates.len() as u64);

    let json = table.to_json_pretty()?;
    writer.write_reliability_json(output, &json)?;

    let output_sha256 = sha256_hex(json.as_bytes());
    tracing::info!(
        rows = projection.rows,
        tickers = table.len(),
        duplicates = projection.duplicates.len(),
        sha256 = %output_sha256,
        "ticker reliability written"
    );

    let summary = ExportSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        rows: projection.rows,
        tickers: table.len(),
        duplicates: projection.duplicates,
        output_sha256,
    };
    Ok(ExportOutcome { table, summary })
}

fn sha256_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest.iter() {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out
}
