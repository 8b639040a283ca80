use clap::Parser;
use reliability_domain::error::ExportError;
use std::path::PathBuf;
use ticker_reliability::obs::{self, LogFormat};
use ticker_reliability::RunArgs;

#[derive(Parser, Debug)]
#[command(name = "ticker-reliability")]
#[command(
    about = "Export per-ticker accuracy statistics as a keyed JSON lookup.",
    version
)]
#[command(
    after_help = "Examples:\n  ticker-reliability\n  ticker-reliability --input evaluation_summary/accuracy.csv --output extension_data/out.json\n  ticker-reliability --config configs/export.toml --json\n"
)]
struct Cli {
    /// Config file path (TOML). Optional; built-in defaults apply without it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Accuracy summary CSV (overrides paths.input_csv).
    #[arg(long)]
    input: Option<PathBuf>,

    /// Reliability JSON destination (overrides paths.output_json).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log filter used when TICKER_RELIABILITY_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Print a single JSON summary line on stdout.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = obs::init_tracing(&cli.log_level, cli.log_format) {
        fail(&err, cli.json);
    }

    let args = RunArgs {
        config_path: cli.config,
        input: cli.input,
        output: cli.output,
    };
    let result =
        ticker_reliability::resolve(args).and_then(|config| ticker_reliability::run(&config));

    match result {
        Ok(outcome) => {
            if cli.json {
                let mut line = serde_json::to_value(&outcome.summary)
                    .unwrap_or_else(|_| serde_json::json!({}));
                line["status"] = serde_json::json!("ok");
                println!("{line}");
            }
        }
        Err(err) => fail(&err, cli.json),
    }
}

fn fail(err: &ExportError, json: bool) -> ! {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "status": "error",
                "kind": err.kind(),
                "error": err.to_string(),
            })
        );
    }
    eprintln!("error: {err}");
    std::process::exit(1);
}
