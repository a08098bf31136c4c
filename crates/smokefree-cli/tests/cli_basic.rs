//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_smokefree-cli"))
        .env("SMOKEFREE_DATA_DIR", data_dir)
        .env_remove("SMOKEFREE_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_status_on_first_run() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["status"]);
    assert_eq!(code, 0, "Status failed");
    assert!(stdout.contains("Smoke-free for"));
    assert!(dir.path().join("smokefree.db").exists());
}

#[test]
fn test_status_json() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["settings", "set-quit-date", "2020-01-01T00:00:00Z"]);
    let (code, stdout, _) = run_cli(dir.path(), &["status", "--json"]);
    assert_eq!(code, 0, "Status JSON failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["quit_in_future"], false);
    assert!(parsed["cigarettes_not_smoked"].as_u64().unwrap() > 0);
}

#[test]
fn test_check_in_twice() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["check-in", "--date", "2024-01-04"]);
    assert_eq!(code, 0, "Check-in failed");
    assert!(stdout.contains("Checked in for 2024-01-04"));

    let (code, stdout, _) = run_cli(dir.path(), &["check-in", "--date", "2024-01-04"]);
    assert_eq!(code, 0, "Repeat check-in failed");
    assert!(stdout.contains("Already checked in"));

    let (_, stdout, _) = run_cli(dir.path(), &["settings", "show"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["succeeded_dates"].as_array().unwrap().len(), 1);
}

#[test]
fn test_undo_check_in() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["check-in", "--date", "2024-01-04"]);
    let (code, stdout, _) = run_cli(dir.path(), &["undo-check-in", "--date", "2024-01-04"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Removed check-in"));
}

#[test]
fn test_check_in_rejects_bad_date() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["check-in", "--date", "2024-02-30"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_check_in_rejects_future_date() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["check-in", "--date", "2999-01-01"]);
    assert_ne!(code, 0, "Future check-in unexpectedly succeeded");
    assert!(stderr.contains("after today"));

    let (_, stdout, _) = run_cli(dir.path(), &["settings", "show"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["succeeded_dates"].as_array().unwrap().is_empty());
}

#[test]
fn test_check_in_on_earliest_date_terminates() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["check-in", "--date=-262143-01-01"]);
    assert_eq!(code, 0, "Check-in on earliest date failed");
    assert!(stdout.contains("Streak: 1 days"));
}

#[test]
fn test_calendar_json() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["check-in", "--date", "2024-01-02"]);
    let (code, stdout, _) = run_cli(dir.path(), &["calendar", "--month", "2024-01", "--json"]);
    assert_eq!(code, 0, "Calendar failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let cells = parsed["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 32);
    assert!(cells[0].is_null());
    assert_eq!(cells[2]["succeeded"], true);
}

#[test]
fn test_settings_set_and_show() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_cli(dir.path(), &["settings", "set-per-day", "15"]).0, 0);
    assert_eq!(run_cli(dir.path(), &["settings", "set-price", "580"]).0, 0);
    assert_eq!(run_cli(dir.path(), &["settings", "set-per-pack", "10"]).0, 0);

    let (_, stdout, _) = run_cli(dir.path(), &["settings", "show"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["cigarettes_per_day"], 15);
    assert_eq!(parsed["price_per_pack"], 580.0);
    assert_eq!(parsed["cigarettes_per_pack"], 10);
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_cli(dir.path(), &["config", "set", "display.currency_symbol", "$"]).0, 0);
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "display.currency_symbol"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "$");

    let (code, _, _) = run_cli(dir.path(), &["config", "get", "display.nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_rejects_excessive_decimals() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        dir.path(),
        &["config", "set", "display.currency_decimals", "4000000000"],
    );
    assert_ne!(code, 0, "Oversized decimals unexpectedly accepted");
    assert!(stderr.contains("must be at most 6"));

    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "display.currency_decimals"]);
    assert_eq!(stdout.trim(), "0");
}

#[test]
fn test_watch_stops_after_count() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["watch", "--count", "1"]);
    assert_eq!(code, 0, "Watch failed");
    assert_eq!(stdout.lines().count(), 1);
}
