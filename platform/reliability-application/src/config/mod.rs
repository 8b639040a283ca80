use reliability_domain::error::ExportError;
use reliability_domain::services::projection::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_CSV: &str =
    "evaluation_summary/accuracy_by_ticker_direction_strength.csv";
pub const DEFAULT_OUTPUT_JSON: &str = "extension_data/ticker_reliability.json";

/// Export settings. Every field has a default, so an absent file is a valid
/// configuration.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub paths: PathsConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub input_csv: PathBuf,
    pub output_json: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_csv: PathBuf::from(DEFAULT_INPUT_CSV),
            output_json: PathBuf::from(DEFAULT_OUTPUT_JSON),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub duplicate_policy: DuplicatePolicy,
    pub create_parent_dirs: bool,
}

impl Config {
    /// Applies command-line overrides on top of file/default values.
    pub fn with_overrides(mut self, input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if let Some(input) = input {
            self.paths.input_csv = input;
        }
        if let Some(output) = output {
            self.paths.output_json = output;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        if self.paths.input_csv.as_os_str().is_empty() {
            return Err(ExportError::Config("paths.input_csv must not be empty".to_string()));
        }
        if self.paths.output_json.as_os_str().is_empty() {
            return Err(ExportError::Config(
                "paths.output_json must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config, ExportError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        ExportError::Config(format!("failed to read config {}: {}", path.display(), err))
    })?;
    toml::from_str(&contents).map_err(|err| {
        ExportError::Config(format!("failed to parse TOML {}: {}", path.display(), err))
    })
}

/// Resolves the effective configuration: file (if any), then overrides, then validation.
pub fn resolve_config(
    config_path: Option<&Path>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<Config, ExportError> {
    let base = match config_path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    let config = base.with_overrides(input, output);
    config.validate()?;
    Ok(config)
}
