//! Integration tests for the hook binary

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_shell-sentinel");

fn run_hook(dir: &TempDir, stdin: &[u8]) -> Output {
    let mut child = Command::new(BIN)
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--no-audit")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// Hook Mode
// ============================================================================

#[test]
fn test_blacklisted_command_denied() {
    let dir = TempDir::new().unwrap();
    let output = run_hook(
        &dir,
        br#"{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}"#,
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("\"permissionDecision\":\"deny\""));
}

#[test]
fn test_safe_command_allowed() {
    let dir = TempDir::new().unwrap();
    let output = run_hook(&dir, br#"{"tool_name":"Bash","tool_input":{"command":"ls -la"}}"#);
    assert_eq!(stdout(&output).trim(), "{}");
}

#[test]
fn test_empty_input_allowed() {
    let dir = TempDir::new().unwrap();
    let output = run_hook(&dir, b"");
    assert_eq!(stdout(&output).trim(), "{}");
}

#[test]
fn test_invalid_utf8_input_denied() {
    let dir = TempDir::new().unwrap();
    let mut payload = br#"{"tool_name":"Bash","tool_input":{"command":"rm -rf / # "#.to_vec();
    payload.push(0xff);
    payload.extend_from_slice(br#""}}"#);

    let output = run_hook(&dir, &payload);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("\"permissionDecision\":\"deny\""), "{}", out);
    assert!(out.contains("UTF-8"));
}

#[test]
fn test_malformed_json_denied() {
    let dir = TempDir::new().unwrap();
    let output = run_hook(&dir, b"{ not json");
    assert!(stdout(&output).contains("\"permissionDecision\":\"deny\""));
}

// ============================================================================
// Arguments
// ============================================================================

fn run_args(args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .unwrap()
}

#[test]
fn test_check_without_value_is_usage_error() {
    let output = run_args(&["--no-audit", "--check"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--check requires a value"));
}

#[test]
fn test_data_dir_without_value_is_usage_error() {
    let output = run_args(&["-d"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("-d requires a value"));
}

#[test]
fn test_check_prints_decision() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().to_string_lossy().into_owned();
    let output = run_args(&["-d", &data_dir, "--no-audit", "--check", "sudo reboot"]);
    assert!(output.status.success());
    let decision: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(decision["action"], "ask");
    assert_eq!(decision["category"], "dangerous");
}
