//! End-to-end tests running the `sleptwhen` binary against sleep logs on disk.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const TWO_NIGHTS: &str = "\
# two nights in early January
sleep Tue Jan  2 23:30:00 2024 - Wed Jan  3 06:30:00 2024
sleep Mon Jan  1 23:00:00 2024 - Tue Jan  2 06:00:00 2024
";

fn sleptwhen_binary() -> String {
    env!("CARGO_BIN_EXE_sleptwhen").to_string()
}

fn write_log(temp: &Path, contents: &str) -> PathBuf {
    let path = temp.join("sleeping.data");
    std::fs::write(&path, contents).unwrap();
    path
}

/// Runs the binary with an isolated config directory and colour disabled.
fn run(temp: &Path, args: &[&str]) -> Output {
    Command::new(sleptwhen_binary())
        .env("HOME", temp)
        .env("XDG_CONFIG_HOME", temp.join(".config"))
        .env_remove("RUST_LOG")
        .args(args)
        .args(["--color", "never"])
        .output()
        .expect("failed to run sleptwhen")
}

#[test]
fn test_full_report() {
    let temp = TempDir::new().unwrap();
    let log = write_log(temp.path(), TWO_NIGHTS);

    let output = run(temp.path(), &["--file", log.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "report should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.starts_with("Period:  January 01 2024 – January 03 2024 (3 days)\n"));
    assert!(stdout.contains("Total time sleeping:   14 hours  0 minutes\n"));
    assert!(stdout.contains("Daily average:         4 hours 40 minutes\n"));
    assert!(stdout.contains("\nHistogram:\n"));
    assert!(stdout.contains(" January 2024 "));
    assert!(stdout.contains("\nWed  3  "));
    assert!(stdout.contains("\nMon  1  "));
    assert!(!stdout.contains('\x1b'), "colour was disabled");

    // Newest day first
    let wed = stdout.find("Wed  3").unwrap();
    let mon = stdout.find("Mon  1").unwrap();
    assert!(wed < mon);
}

#[test]
fn test_report_subcommand_json() {
    let temp = TempDir::new().unwrap();
    let log = write_log(temp.path(), TWO_NIGHTS);

    let output = run(temp.path(), &["report", "--json", "--file", log.to_str().unwrap()]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["period"]["days"], 3);
    assert_eq!(value["totals"]["sleep_ms"], 14 * 3_600_000);
    assert_eq!(value["histogram"]["buckets"].as_array().unwrap().len(), 48);
    assert_eq!(value["days"].as_array().unwrap().len(), 3);
}

#[test]
fn test_summary_subcommand() {
    let temp = TempDir::new().unwrap();
    let log = write_log(temp.path(), TWO_NIGHTS);

    let output = run(temp.path(), &["summary", "--file", log.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 4);
    assert!(!stdout.contains("Histogram:"));
}

#[test]
fn test_no_parsable_data_fails() {
    let temp = TempDir::new().unwrap();
    let log = write_log(temp.path(), "# nothing yet\nslep Mon Jan 01 23:00:00 2024\n");

    let output = run(temp.path(), &["--file", log.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("found no parsable data in"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_malformed_lines_are_skipped_with_warning() {
    let temp = TempDir::new().unwrap();
    let contents = format!("{TWO_NIGHTS}sleep Mon Jan 41 23:00:00 2024 - Tue Jan 02 06:00:00 2024\n");
    let log = write_log(temp.path(), &contents);

    let output = run(temp.path(), &["--file", log.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Total time sleeping:   14 hours  0 minutes"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipping malformed line"), "unexpected stderr: {stderr}");
}

#[test]
fn test_data_file_from_config() {
    let temp = TempDir::new().unwrap();
    let log = write_log(temp.path(), TWO_NIGHTS);
    let config = temp.path().join("sleptwhen.toml");
    std::fs::write(&config, format!("data_file = {:?}\n", log.to_str().unwrap())).unwrap();

    let output = run(temp.path(), &["summary", "--config", config.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "summary should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8(output.stdout).unwrap().contains("(3 days)"));
}

#[test]
fn test_missing_log_file_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.data");

    let output = run(temp.path(), &["--file", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to open sleep log"));
}
