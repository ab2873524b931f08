//! Integration tests for the pulsecheck CLI.
//!
//! These run the binary as a subprocess; nothing here touches the network.

use std::process::Command;

fn run_cli(args: &[&str]) -> std::process::Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pulsecheck"));
    command.args(args);
    command.output().expect("failed to run CLI")
}

#[test]
fn test_cli_help() {
    let output = run_cli(&["--help"]);
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert!(stdout.contains("actively maintained"));
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--json"));
}

#[test]
fn test_cli_version() {
    let output = run_cli(&["--version"]);
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert!(stdout.contains("pulsecheck"));
}

#[test]
fn test_cli_rejects_invalid_url() {
    let output = run_cli(&["ftp://example.com"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("could not interpret"));
}
