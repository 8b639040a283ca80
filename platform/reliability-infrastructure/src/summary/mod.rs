use reliability_domain::error::ExportError;
use reliability_domain::repositories::summary::{SummaryReader, SummaryReport};
use reliability_domain::services::coercion::{coerce_float, coerce_integer};
use reliability_domain::value_objects::summary_row::{columns, SummaryRow};
use reliability_domain::value_objects::ticker_metrics::TickerMetrics;
use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvSummaryReader;

impl CsvSummaryReader {
    pub fn new() -> Self {
        Self
    }
}

impl SummaryReader for CsvSummaryReader {
    fn load_summary(
        &self,
        path: &Path,
    ) -> Result<(Vec<SummaryRow>, SummaryReport), ExportError> {
        let start = Instant::now();
        let result = load_summary_csv(path);
        record_read_metrics(start, &result);
        result
    }
}

fn record_read_metrics<T>(start: Instant, result: &Result<T, ExportError>) {
    let result_label = match result {
        Ok(_) => "ok",
        Err(err) => err.kind(),
    };
    metrics::counter!(
        "ticker_reliability.infra.summary.read.calls_total",
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!("ticker_reliability.infra.summary.read_ms", "result" => result_label)
        .record(start.elapsed().as_millis() as f64);
}

/// Column positions of the projected fields within the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnLayout {
    ticker: usize,
    samples: usize,
    direction_accuracy: usize,
    avg_hierarchical_score: usize,
}

impl ColumnLayout {
    fn resolve(
        path: &Path,
        headers: &csv::StringRecord,
    ) -> Result<(Self, Vec<String>), ExportError> {
        // The csv reader strips a leading UTF-8 byte order mark from the header.
        let names: Vec<&str> = headers.iter().collect();
        let position = |column: &str| names.iter().position(|name| *name == column);

        let missing: Vec<String> = columns::REQUIRED
            .into_iter()
            .filter(|column| position(*column).is_none())
            .map(|column| column.to_string())
            .collect();

        match (
            position(columns::TICKER),
            position(columns::SAMPLES),
            position(columns::DIRECTION_ACCURACY),
            position(columns::AVG_HIERARCHICAL_SCORE),
        ) {
            (
                Some(ticker),
                Some(samples),
                Some(direction_accuracy),
                Some(avg_hierarchical_score),
            ) => {
                let ignored = names
                    .iter()
                    .filter(|name| !columns::REQUIRED.contains(*name))
                    .map(|name| name.to_string())
                    .collect();
                Ok((
                    Self {
                        ticker,
                        samples,
                        direction_accuracy,
                        avg_hierarchical_score,
                    },
                    ignored,
                ))
            }
            _ => Err(ExportError::Schema {
                path: path.to_path_buf(),
                missing,
            }),
        }
    }

    fn project(
        &self,
        path: &Path,
        line: u64,
        record: &csv::StringRecord,
    ) -> Result<SummaryRow, ExportError> {
        let cell = |idx: usize| record.get(idx).unwrap_or_default();
        let coercion_error = |column: &str, value: &str, expected: &'static str| {
            ExportError::Coercion {
                path: path.to_path_buf(),
                line,
                column: column.to_string(),
                value: value.to_string(),
                expected,
            }
        };

        let raw_samples = cell(self.samples);
        let samples = coerce_integer(raw_samples)
            .ok_or_else(|| coercion_error(columns::SAMPLES, raw_samples, "integer"))?;

        let raw_accuracy = cell(self.direction_accuracy);
        let direction_accuracy = coerce_float(raw_accuracy)
            .ok_or_else(|| coercion_error(columns::DIRECTION_ACCURACY, raw_accuracy, "float"))?;

        let raw_score = cell(self.avg_hierarchical_score);
        let avg_hierarchical_score = coerce_float(raw_score)
            .ok_or_else(|| coercion_error(columns::AVG_HIERARCHICAL_SCORE, raw_score, "float"))?;

        Ok(SummaryRow {
            ticker: cell(self.ticker).to_string(),
            line,
            metrics: TickerMetrics {
                samples,
                direction_accuracy,
                avg_hierarchical_score,
            },
        })
    }
}

pub fn load_summary_csv(path: &Path) -> Result<(Vec<SummaryRow>, SummaryReport), ExportError> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ExportError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ExportError::io(path, &err),
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::None)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|err| malformed(path, &err))?
        .clone();
    let (layout, ignored_columns) = ColumnLayout::resolve(path, &headers)?;
    tracing::debug!(
        path = %path.display(),
        ignored_columns = ?ignored_columns,
        "resolved accuracy summary header"
    );

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|err| malformed(path, &err))?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        rows.push(layout.project(path, line, &record)?);
    }

    let report = SummaryReport {
        rows: rows.len(),
        ignored_columns,
    };
    Ok((rows, report))
}

fn malformed(path: &Path, err: &csv::Error) -> ExportError {
    if let csv::ErrorKind::Io(io_err) = err.kind() {
        return ExportError::io(path, io_err);
    }
    ExportError::MalformedTable {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
