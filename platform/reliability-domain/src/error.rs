use std::path::{Path, PathBuf};
use thiserror::Error;

/// Every way an export run can fail. None of these are recovered locally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("input not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error(
        "missing required column(s) {} in {}",
        .missing.join(", "),
        .path.display()
    )]
    Schema { path: PathBuf, missing: Vec<String> },

    #[error(
        "{}:{line}: column `{column}` value {value:?} is not a valid {expected}",
        .path.display()
    )]
    Coercion {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("malformed table {}: {message}", .path.display())]
    MalformedTable { path: PathBuf, message: String },

    #[error(
        "duplicate ticker {ticker:?} in {} (lines {first_line} and {line})",
        .path.display()
    )]
    DuplicateTicker {
        path: PathBuf,
        ticker: String,
        first_line: u64,
        line: u64,
    },

    #[error("i/o error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("failed to serialize reliability table: {0}")]
    Serialize(String),

    #[error("config: {0}")]
    Config(String),
}

impl ExportError {
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        ExportError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Short stable label, used for metrics and the JSON failure line.
    pub fn kind(&self) -> &'static str {
        match self {
            ExportError::NotFound { .. } => "not_found",
            ExportError::Schema { .. } => "schema",
            ExportError::Coercion { .. } => "coercion",
            ExportError::MalformedTable { .. } => "malformed_table",
            ExportError::DuplicateTicker { .. } => "duplicate_ticker",
            ExportError::Io { .. } => "io",
            ExportError::Serialize(_) => "serialize",
            ExportError::Config(_) => "config",
        }
    }
}
