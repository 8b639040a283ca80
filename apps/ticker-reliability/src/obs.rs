use clap::ValueEnum;
use reliability_domain::error::ExportError;

pub const LOG_ENV: &str = "TICKER_RELIABILITY_LOG";

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Installs the global subscriber. Output goes to stderr; stdout carries only
/// the optional JSON summary line.
pub fn init_tracing(log_level: &str, log_format: LogFormat) -> Result<(), ExportError> {
    let filter = std::env::var(LOG_ENV).unwrap_or_else(|_| log_level.to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(filter)
        .map_err(|err| ExportError::Config(format!("invalid log filter: {err}")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    match log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
    Ok(())
}
