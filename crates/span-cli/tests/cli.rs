//! CLI integration tests for the `span` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn span_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("span"));
    // Keep the environment from leaking a real key or log filter into tests.
    cmd.env_remove("GEMINI_API_KEY").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_one_week_text_report() {
    span_cmd()
        .args(["--start-date", "2024-01-01", "--end-date", "2024-01-08"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Total Duration: 7 days\n"))
        .stdout(predicate::str::contains("Business days"))
        .stdout(predicate::str::contains("$1000.00"));
}

#[test]
fn test_json_output_matches_engine() {
    let output = span_cmd()
        .args([
            "--start-date",
            "2023-01-01",
            "--end-date",
            "2024-03-15",
            "--end-time",
            "10:30 AM",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["result"]["formatted_duration"],
        "1 years, 2 months, 14 days, 10 hours, 30 minutes"
    );
    assert_eq!(json["result"]["years"], 1);
    assert_eq!(json["result"]["months"], 2);
    assert_eq!(json["result"]["days"], 14);
}

#[test]
fn test_reversed_order_keeps_negative_diff() {
    let output = span_cmd()
        .args([
            "--start-date",
            "2024-01-08",
            "--end-date",
            "2024-01-01",
            "--json",
        ])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["result"]["diff_milliseconds"], -604_800_000i64);
    assert_eq!(json["result"]["business_days"], 5);
}

#[test]
fn test_holidays_and_weekend_exclusion() {
    let output = span_cmd()
        .args([
            "--start-date",
            "2024-01-01",
            "--end-date",
            "2024-01-08",
            "--holiday",
            "2024-01-03",
            "--holiday",
            "2024-01-03",
            "--exclude-weekends",
            "--json",
        ])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["result"]["business_days"], 4);
    assert_eq!(json["result"]["weekend_days"], 3);
    assert_eq!(json["result"]["counted_days"], 4.0);
    assert_eq!(json["request"]["holidays"].as_array().unwrap().len(), 1);
}

#[test]
fn test_share_summary() {
    span_cmd()
        .args([
            "--start-date",
            "2024-01-01",
            "--end-date",
            "2024-01-08",
            "--share",
        ])
        .assert()
        .success()
        .stdout("Duration Calculation:\n7 days\nTotal Days: 7\nBusiness Days: 5\n");
}

#[test]
fn test_same_instant() {
    span_cmd()
        .args(["--start-date", "2024-06-01", "--end-date", "2024-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Total Duration: 0 minutes\n"));
}

#[test]
fn test_insight_without_key_uses_placeholder() {
    span_cmd()
        .args([
            "--start-date",
            "2024-01-01",
            "--end-date",
            "2024-01-08",
            "--insight",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Please provide an API Key to unlock AI insights.",
        ));
}

#[test]
fn test_invalid_date_fails() {
    span_cmd()
        .args(["--start-date", "2024-13-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_invalid_time_fails() {
    span_cmd()
        .args(["--start-date", "2024-01-01", "--start-time", "25:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time"));
}

#[test]
fn test_json_and_share_conflict() {
    span_cmd().args(["--json", "--share"]).assert().failure();
}
