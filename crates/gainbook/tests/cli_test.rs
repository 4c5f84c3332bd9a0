//! End-to-end tests for the `gainbook` binary.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn gainbook(args: &[&str], acquisitions: &Path, disposals: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gainbook"))
        .arg(args[0])
        .arg(acquisitions)
        .arg(disposals)
        .args(&args[1..])
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run gainbook")
}

fn run_fixtures(args: &[&str]) -> Output {
    let dir = fixtures_dir();
    gainbook(args, &dir.join("acquisitions.csv"), &dir.join("disposals.csv"))
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn decimal(value: &serde_json::Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn fifo_json_report() {
    let output = run_fixtures(&["FIFO", "--format", "json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let report = json(&output);
    assert_eq!(report["method"], "FIFO");

    let short = report["shortTerm"]["records"].as_array().unwrap();
    let long = report["longTerm"]["records"].as_array().unwrap();
    assert_eq!(short.len(), 2);
    assert_eq!(long.len(), 2);

    assert_eq!(decimal(&report["shortTerm"]["total"]), dec!(-3000));
    assert_eq!(decimal(&report["longTerm"]["total"]), dec!(23950));

    // First step consumes the whole first lot
    assert_eq!(long[0]["dateAcquired"], "2020-03-01");
    assert_eq!(decimal(&long[0]["salesPrice"]), dec!(27500));
    assert_eq!(decimal(&long[0]["costBasis"]), dec!(4000));

    assert_eq!(decimal(&report["unmatched"]["acquiredUnits"]), Decimal::ZERO);
    assert_eq!(decimal(&report["unmatched"]["disposedUnits"]), Decimal::ZERO);
    assert!(stderr(&output).is_empty());
}

#[test]
fn hifo_json_report() {
    let output = run_fixtures(&["hifo", "--format", "json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let report = json(&output);
    assert_eq!(report["method"], "HIFO");
    assert_eq!(decimal(&report["shortTerm"]["total"]), dec!(4250));
    assert_eq!(decimal(&report["longTerm"]["total"]), dec!(16700));

    // Most expensive lot is matched first
    let short = report["shortTerm"]["records"].as_array().unwrap();
    assert_eq!(decimal(&short[0]["costBasis"]), dec!(14500));
    assert_eq!(decimal(&short[0]["gainOrLoss"]), dec!(-750));
}

#[test]
fn text_report() {
    let output = run_fixtures(&["FIFO"]);
    assert!(output.status.success());

    let text = String::from_utf8_lossy(&output.stdout);
    let short = text.find("Short Term Gains or Losses").unwrap();
    let long = text.find("Long Term Gains or Losses").unwrap();
    assert!(short < long);
    assert!(text.contains("Total long term gain or loss:"));
}

#[test]
fn invalid_method_exits_with_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");

    // Files do not exist; the method is rejected first
    let output = gainbook(&["LIFO"], &missing, &missing);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("unknown method"));
}

#[test]
fn missing_file_is_runtime_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");

    let output = gainbook(&["FIFO"], &missing, &missing);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error:"));
    assert!(stderr(&output).contains("missing.csv"));
}

#[test]
fn malformed_row_is_runtime_error() {
    let buys = write_temp("asset,date,description,quantity,cost\nBTC,2021-13-01,,1,100\n");
    let sells = write_temp("asset,date,description,quantity,value\n");

    let output = gainbook(&["FIFO"], buys.path(), sells.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("line 2"), "{}", stderr(&output));
}

#[test]
fn oversold_warns_and_strict_fails() {
    let buys = write_temp("asset,date,description,quantity,cost\nBTC,2021-01-01,,1,100\n");
    let sells = write_temp("asset,date,description,quantity,value\nBTC,2021-02-01,,3,600\n");

    let output = gainbook(&["FIFO", "--format", "json"], buys.path(), sells.path());
    assert!(output.status.success());
    assert!(stderr(&output).contains("warning: 2 disposed units have no matching acquisition"));
    assert_eq!(decimal(&json(&output)["unmatched"]["disposedUnits"]), dec!(2));

    let quiet = gainbook(&["FIFO", "--quiet"], buys.path(), sells.path());
    assert!(quiet.status.success());
    assert!(stderr(&quiet).is_empty());

    let strict = gainbook(&["FIFO", "--strict"], buys.path(), sells.path());
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn custom_csv_options() {
    let buys = write_temp("ETH;01/15/2020;;2;300\n");
    let sells = write_temp("ETH;03/01/2021;;2;3000\n");

    let output = gainbook(
        &[
            "FIFO",
            "--format",
            "json",
            "--delimiter",
            ";",
            "--date-format",
            "%m/%d/%Y",
            "--no-header",
        ],
        buys.path(),
        sells.path(),
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let report = json(&output);
    assert_eq!(report["longTerm"]["records"][0]["description"], "2 ETH");
    assert_eq!(decimal(&report["longTerm"]["total"]), dec!(2700));
}
