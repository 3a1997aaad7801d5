//! CLI flag contract tests
//!
//! Verifies exit codes and flag handling that scripts depend on
//! (--version, usage errors, --format validation, --log-level).

use std::process::Command;

fn swiftuice_bin() -> &'static str {
    env!("CARGO_BIN_EXE_swiftuice")
}

fn run(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(swiftuice_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run swiftuice");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
fn test_version_subcommand() {
    let (code, stdout, _) = run(&["version"]);
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim(),
        format!("swiftuice v{}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_version_flag() {
    let (code, stdout, _) = run(&["--version"]);
    assert_eq!(code, 0);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let (code, _, stderr) = run(&["analyze", "--in", "x", "--bogus"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("--bogus"));
}

#[test]
fn test_missing_required_flag_is_usage_error() {
    let (code, _, _) = run(&["analyze"]);
    assert_eq!(code, 2);

    let (code, _, _) = run(&["record"]);
    assert_eq!(code, 2);
}

#[test]
fn test_invalid_export_format_rejected() {
    let (code, _, stderr) = run(&["export", "--trace", "a.trace", "--format", "yaml"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("yaml"));
}

#[test]
fn test_invalid_log_level_rejected() {
    let (code, _, _) = run(&["--log-level", "loud", "version"]);
    assert_eq!(code, 2);
}

#[test]
fn test_help_lists_commands() {
    let (code, stdout, _) = run(&["--help"]);
    assert_eq!(code, 0);
    for command in ["record", "export", "summarize", "analyze", "version"] {
        assert!(stdout.contains(command), "help should list {command}");
    }
}

#[test]
fn test_analyze_help_documents_exit_codes() {
    let (code, stdout, _) = run(&["analyze", "--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("3 no parseable data"));
    assert!(stdout.contains("--rerender-threshold"));
}
