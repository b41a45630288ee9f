//! Startup behaviour of the watcher binary.

use std::process::Command;

fn watcher() -> Command {
    Command::new(env!("CARGO_BIN_EXE_edge-exit-watcher"))
}

#[test]
fn missing_script_path_prints_usage_and_exits_1() {
    let output = watcher().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: edge-exit-watcher <absolute_path_to_script>"));
    // Nothing is logged before the argument check.
    assert!(!stdout.contains("started"));
}

#[test]
fn empty_script_path_is_rejected_like_a_missing_one() {
    let output = watcher().arg("").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Usage:"));
}

#[test]
fn help_does_not_start_watching() {
    let output = watcher().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("SCRIPT_PATH"));
    assert!(stdout.contains("macOS only"));
}
