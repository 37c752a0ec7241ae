//! CLI Integration Tests
//!
//! End-to-end tests for CLI commands using assert_cmd. Data commands run
//! with `--mock` and a config path that does not exist, so nothing calls AWS.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Get the finops binary with mock-related environment cleared
fn finops_cmd() -> Command {
    let mut cmd = Command::cargo_bin("finops").unwrap();
    for var in [
        "EnableMock",
        "FINOPS_MOCK",
        "FINOPS_MOCK_SEED",
        "FINOPS_LOG_LEVEL",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn mock_args(temp: &TempDir, args: &[&str]) -> Vec<String> {
    let config = temp.path().join("absent.toml");
    let mut all: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    all.extend([
        "--mock".to_string(),
        "-c".to_string(),
        config.to_string_lossy().into_owned(),
    ]);
    all
}

#[test]
fn test_version_output() {
    finops_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("finops"));
}

#[test]
fn test_help_shows_all_commands() {
    let output = finops_cmd().arg("--help").output().unwrap();
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for command in [
        "accounts",
        "costs",
        "report",
        "invoke",
        "serve",
        "chat",
        "config",
        "completions",
    ] {
        assert!(help.contains(command), "help is missing {}", command);
    }
}

#[test]
fn test_accounts_json_mock() {
    let temp = TempDir::new().unwrap();

    let output = finops_cmd()
        .args(mock_args(&temp, &["accounts", "--json"]))
        .env("FINOPS_MOCK_SEED", "4")
        .output()
        .unwrap();

    assert!(output.status.success());
    let accounts: Value = serde_json::from_slice(&output.stdout).unwrap();
    let accounts = accounts.as_array().unwrap();
    assert_eq!(accounts.len(), 10);
    assert_eq!(accounts[0]["Id"], "123456789001");
}

#[test]
fn test_mock_via_legacy_env() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("absent.toml");

    let output = finops_cmd()
        .args(["accounts", "--json", "-c", config.to_str().unwrap()])
        .env("EnableMock", "TRUE")
        .output()
        .unwrap();

    assert!(output.status.success());
    let accounts: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(accounts.as_array().unwrap().len(), 10);
}

#[test]
fn test_accounts_filter_no_match() {
    let temp = TempDir::new().unwrap();

    finops_cmd()
        .args(mock_args(&temp, &["accounts", "--department", "Marketing"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("No accounts found"));
}

#[test]
fn test_costs_month_json() {
    let temp = TempDir::new().unwrap();

    let output = finops_cmd()
        .args(mock_args(
            &temp,
            &["costs", "--month", "2024-12", "--account", "123456789001", "--json"],
        ))
        .output()
        .unwrap();

    assert!(output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["ResultsByTime"][0]["TimePeriod"]["Start"], "2024-12-01");
    assert_eq!(result["ResultsByTime"][0]["TimePeriod"]["End"], "2025-01-01");
}

#[test]
fn test_costs_bad_date_fails() {
    let temp = TempDir::new().unwrap();

    finops_cmd()
        .args(mock_args(&temp, &["costs", "--start", "2024-08-01", "--end", "2024-13-01"]))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid date '2024-13-01'"));
}

#[test]
fn test_report_prints_cost_lines() {
    let temp = TempDir::new().unwrap();

    finops_cmd()
        .args(mock_args(&temp, &["report", "--year", "2024", "--month", "9"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("Month: 2024-09-01, Cost for account 123456789001: $"))
        .stdout(predicate::str::contains("    \"Id\": \"123456789010\""));
}

#[test]
fn test_invoke_event_from_stdin() {
    let temp = TempDir::new().unwrap();
    let event = r#"{"messageVersion": "1.0", "actionGroup": "finops", "apiPath": "/account/{accountId}/costs", "httpMethod": "GET",
        "parameters": [{"name": "start_date", "value": "2024-08-01"}, {"name": "end_date", "value": "2024-09-01"}]}"#;

    let output = finops_cmd()
        .args(mock_args(&temp, &["invoke", "--event", "-"]))
        .write_stdin(event)
        .output()
        .unwrap();

    assert!(output.status.success());
    let response: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["response"]["httpStatusCode"], 200);
    assert_eq!(response["response"]["apiPath"], "/account/{accountId}/costs");
}

#[test]
fn test_invoke_unknown_path_fails() {
    let temp = TempDir::new().unwrap();
    let event = r#"{"actionGroup": "finops", "apiPath": "/budgets", "httpMethod": "GET"}"#;

    finops_cmd()
        .args(mock_args(&temp, &["invoke"]))
        .write_stdin(event)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown API path: /budgets"));
}

#[test]
fn test_chat_requires_agent_id() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("absent.toml");

    finops_cmd()
        .env_remove("FINOPS_AGENT_ID")
        .args(["chat", "-c", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No agent id configured"));
}

#[test]
fn test_config_init_creates_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("finops.toml");

    finops_cmd()
        .args(["config", "init", "-o", config_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file created"));

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[directory]"));
}

#[test]
fn test_config_init_no_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("finops.toml");
    std::fs::write(&config_path, "existing content").unwrap();

    finops_cmd()
        .args(["config", "init", "-o", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_invalid_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("finops.toml");
    std::fs::write(&config_path, "[server]\nport = \"not a number\"").unwrap();

    finops_cmd()
        .args(["accounts", "--mock", "-c", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_completions_bash() {
    finops_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("finops"));
}
