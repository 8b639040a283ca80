pub mod obs;

use reliability_application::config::{self, Config};
use reliability_application::export::{self, ExportOutcome};
use reliability_domain::error::ExportError;
use reliability_infrastructure::artifacts::FilesystemReliabilityWriter;
use reliability_infrastructure::summary::CsvSummaryReader;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub config_path: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

pub fn resolve(args: RunArgs) -> Result<Config, ExportError> {
    let config = config::resolve_config(args.config_path.as_deref(), args.input, args.output)?;
    tracing::debug!(
        input = %config.paths.input_csv.display(),
        output = %config.paths.output_json.display(),
        duplicate_policy = ?config.export.duplicate_policy,
        create_parent_dirs = config.export.create_parent_dirs,
        "resolved export configuration"
    );
    Ok(config)
}

/// Wires the filesystem adapters into the export use case.
pub fn run(config: &Config) -> Result<ExportOutcome, ExportError> {
    let reader = CsvSummaryReader::new();
    let writer =
        FilesystemReliabilityWriter::new().with_create_parent_dirs(config.export.create_parent_dirs);
    export::transform(config, &reader, &writer)
}
