//! Basic CLI E2E tests.
//!
//! Tests invoke the compiled binary against a temporary data directory and
//! verify outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_flowmodoro"))
        .args(args)
        .env("FLOWMODORO_DATA_DIR", data_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command {args:?} failed: {stderr}");
    stdout
}

fn task_list(data_dir: &Path) -> Vec<String> {
    let out = run_cli_success(data_dir, &["task", "list", "--json"]);
    serde_json::from_str(&out).expect("task list --json should print a JSON array")
}

#[test]
fn test_task_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["task", "add", "write", "report"]);
    run_cli_success(dir.path(), &["task", "add", "review"]);
    assert_eq!(task_list(dir.path()), vec!["write report", "review"]);

    let out = run_cli_success(dir.path(), &["task", "list"]);
    assert!(out.contains("Tasks (2)"));
    assert!(out.contains("1. write report"));
}

#[test]
fn test_task_add_blank_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["task", "add", "   "]);
    assert!(out.contains("Ignored"));
    assert!(task_list(dir.path()).is_empty());
}

#[test]
fn test_task_remove_and_reorder() {
    let dir = tempfile::tempdir().unwrap();
    for t in ["a", "b", "c"] {
        run_cli_success(dir.path(), &["task", "add", t]);
    }
    run_cli_success(dir.path(), &["task", "reorder", "3", "1", "2"]);
    assert_eq!(task_list(dir.path()), vec!["c", "a", "b"]);

    run_cli_success(dir.path(), &["task", "remove", "2"]);
    assert_eq!(task_list(dir.path()), vec!["c", "b"]);

    let (code, _, stderr) = run_cli(dir.path(), &["task", "reorder", "1", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
    assert_eq!(task_list(dir.path()), vec!["c", "b"]);
}

#[test]
fn test_log_show_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["log", "show"]);
    assert!(out.contains("Session Log (0 Work, 0 Break)"));
    run_cli_success(dir.path(), &["log", "clear"]);
}

#[test]
fn test_panel_toggle() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["panel", "toggle", "log"]);
    let out = run_cli_success(dir.path(), &["panel", "show"]);
    let panels: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(panels["log_visible"], false);
    assert_eq!(panels["tasks_visible"], true);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["config", "get", "notifications.volume"]);
    assert_eq!(out.trim(), "20");
    run_cli_success(dir.path(), &["config", "set", "timer.tick_interval_ms", "500"]);
    let out = run_cli_success(dir.path(), &["config", "get", "timer.tick_interval_ms"]);
    assert_eq!(out.trim(), "500");

    let (code, _, _) = run_cli(dir.path(), &["config", "get", "ui.dark_mode"]);
    assert_eq!(code, 1);
    let (code, _, _) = run_cli(dir.path(), &["config", "set", "timer.tick_interval_ms", "9000"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_list() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["config", "list"]);
    assert!(out.contains("tick_interval_ms"));
}

#[test]
fn test_run_stop_work_starts_break() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_flowmodoro"))
        .args(["run", "--ephemeral"])
        .env("FLOWMODORO_DATA_DIR", dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"s\nx\nq\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Work in Progress"));
    assert!(stdout.contains("Break in Progress"));
}

#[test]
fn test_run_exits_on_eof() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_flowmodoro"))
        .args(["run", "--ephemeral", "--json"])
        .env("FLOWMODORO_DATA_DIR", dir.path())
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = stdout.lines().next().unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(first).unwrap();
    assert_eq!(snapshot["phase"], "standby");
    assert_eq!(snapshot["display"], "00:00");
}

#[test]
fn test_run_json_lines_survive_break_completion() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_flowmodoro"))
        .args(["run", "--ephemeral", "--json"])
        .env("FLOWMODORO_DATA_DIR", dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"s\nx\n").unwrap();
    stdin.flush().unwrap();
    // The minimum break is one second.
    std::thread::sleep(std::time::Duration::from_millis(1600));
    stdin.write_all(b"q\n").unwrap();
    drop(stdin);

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let snapshots: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| {
            serde_json::from_str(line).unwrap_or_else(|e| panic!("bad JSON line {line:?}: {e}"))
        })
        .collect();
    assert!(snapshots.iter().any(|s| s["phase"] == "break_running"));
    assert_eq!(snapshots.last().unwrap()["phase"], "standby");
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["completions", "bash"]);
    assert!(out.contains("flowmodoro"));
}
