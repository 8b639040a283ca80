use reliability_application::config::Config;
use reliability_application::export::transform;
use reliability_domain::error::ExportError;
use reliability_domain::services::projection::DuplicatePolicy;
use reliability_infrastructure::artifacts::FilesystemReliabilityWriter;
use reliability_infrastructure::summary::CsvSummaryReader;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const HEADER: &str = "Ticker,samples,direction_accuracy,avg_hierarchical_score\n";

fn test_temp_dir(prefix: &str) -> PathBuf {
    let unique = format!(
        "{}_{}_{}",
        prefix,
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX_EPOCH")
            .as_nanos()
    );
    let dir = std::env::temp_dir().join(unique);
    fs::create_dir_all(&dir).expect("temp dir");
    dir
}

fn config_for(dir: &Path, csv: &str) -> Config {
    let input = dir.join("accuracy_by_ticker_direction_strength.csv");
    fs::write(&input, csv).expect("write csv");
    Config::default().with_overrides(Some(input), Some(dir.join("ticker_reliability.json")))
}

fn run(config: &Config) -> Result<reliability_application::export::ExportOutcome, ExportError> {
    let writer =
        FilesystemReliabilityWriter::new().with_create_parent_dirs(config.export.create_parent_dirs);
    transform(config, &CsvSummaryReader::new(), &writer)
}

#[test]
fn end_to_end_example_produces_expected_json() {
    let dir = test_temp_dir("ticker_reliability_e2e");
    let config = config_for(
        &dir,
        &format!("{HEADER}AAPL,120,0.6417,0.812\nMSFT,98,0.5816,0.774\n"),
    );

    let outcome = run(&config).expect("transform");

    let written = fs::read_to_string(&config.paths.output_json).expect("read output");
    let expected = r#"{
  "AAPL": {
    "samples": 120,
    "direction_accuracy": 0.6417,
    "avg_hierarchical_score": 0.812
  },
  "MSFT": {
    "samples": 98,
    "direction_accuracy": 0.5816,
    "avg_hierarchical_score": 0.774
  }
}"#;
    assert_eq!(written, expected);
    assert_eq!(outcome.summary.rows, 2);
    assert_eq!(outcome.summary.tickers, 2);
    assert!(outcome.summary.duplicates.is_empty());

    let parsed: serde_json::Value = serde_json::from_str(&written).expect("json");
    assert_eq!(parsed["AAPL"]["samples"].as_i64(), Some(120));
    assert_eq!(parsed["MSFT"]["direction_accuracy"].as_f64(), Some(0.5816));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn header_only_input_writes_empty_object() {
    let dir = test_temp_dir("ticker_reliability_empty");
    let config = config_for(&dir, HEADER);

    let outcome = run(&config).expect("transform");

    assert!(outcome.table.is_empty());
    assert_eq!(
        fs::read_to_string(&config.paths.output_json).expect("read"),
        "{}"
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn rerun_on_unchanged_input_is_byte_identical() {
    let dir = test_temp_dir("ticker_reliability_idempotent");
    let config = config_for(
        &dir,
        &format!("{HEADER}TSLA,40,0.55,0.61\nAMZN,77,0.6,0.7\nTSLA,41,0.56,0.62\n"),
    );

    let first = run(&config).expect("first run");
    let first_bytes = fs::read(&config.paths.output_json).expect("read");
    let second = run(&config).expect("second run");
    let second_bytes = fs::read(&config.paths.output_json).expect("read");

    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first.summary.output_sha256, second.summary.output_sha256);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn duplicate_ticker_keeps_last_row() {
    let dir = test_temp_dir("ticker_reliability_dupes");
    let config = config_for(
        &dir,
        &format!("{HEADER}TSLA,40,0.55,0.61\nAMZN,77,0.6,0.7\nTSLA,41,0.56,0.62\n"),
    );

    let outcome = run(&config).expect("transform");

    let tsla = outcome.table.get("TSLA").expect("TSLA");
    assert_eq!(tsla.samples, 41);
    assert_eq!(tsla.direction_accuracy, 0.56);
    assert_eq!(outcome.summary.duplicates, vec!["TSLA".to_string()]);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn reject_policy_fails_without_writing() {
    let dir = test_temp_dir("ticker_reliability_reject");
    let mut config = config_for(
        &dir,
        &format!("{HEADER}TSLA,40,0.55,0.61\nTSLA,41,0.56,0.62\n"),
    );
    config.export.duplicate_policy = DuplicatePolicy::Reject;

    let err = run(&config).expect_err("duplicate");
    assert!(matches!(
        err,
        ExportError::DuplicateTicker { first_line: 2, line: 3, .. }
    ));
    assert!(!config.paths.output_json.exists());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn coercion_failure_leaves_previous_output_untouched() {
    let dir = test_temp_dir("ticker_reliability_coercion");
    let config = config_for(&dir, &format!("{HEADER}AAPL,120,0.6417,0.812\n"));
    run(&config).expect("first run");
    let before = fs::read(&config.paths.output_json).expect("read");

    fs::write(
        &config.paths.input_csv,
        format!("{HEADER}AAPL,many,0.6417,0.812\n"),
    )
    .expect("rewrite csv");
    let err = run(&config).expect_err("coercion");

    assert_eq!(err.kind(), "coercion");
    assert!(err.to_string().contains("\"many\""));
    assert_eq!(fs::read(&config.paths.output_json).expect("read"), before);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn coercion_failure_creates_no_output() {
    let dir = test_temp_dir("ticker_reliability_no_output");
    let config = config_for(&dir, &format!("{HEADER}AAPL,120,high,0.812\n"));

    let err = run(&config).expect_err("coercion");

    assert!(matches!(err, ExportError::Coercion { ref column, .. } if column == "direction_accuracy"));
    assert!(!config.paths.output_json.exists());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_output_parent_is_io_error_unless_creation_enabled() {
    let dir = test_temp_dir("ticker_reliability_parent");
    let input = dir.join("summary.csv");
    fs::write(&input, format!("{HEADER}AAPL,1,0.5,0.5\n")).expect("write csv");
    let output = dir.join("extension_data").join("ticker_reliability.json");

    let mut config = Config::default().with_overrides(Some(input), Some(output.clone()));
    let err = run(&config).expect_err("missing parent");
    assert_eq!(err.kind(), "io");
    assert!(!output.exists());

    config.export.create_parent_dirs = true;
    run(&config).expect("transform with mkdir");
    assert!(output.is_file());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_input_is_not_found() {
    let dir = test_temp_dir("ticker_reliability_missing_input");
    let config = Config::default().with_overrides(
        Some(dir.join("nope.csv")),
        Some(dir.join("ticker_reliability.json")),
    );

    let err = run(&config).expect_err("not found");
    assert_eq!(
        err,
        ExportError::NotFound {
            path: dir.join("nope.csv")
        }
    );
    let _ = fs::remove_dir_all(&dir);
}
