// crates/tasklist-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests for the tasklist binary.
// Purpose: Ensure config resolution and validation failures surface as exit codes.
// Dependencies: tasklist-cli binary
// ============================================================================
//! ## Overview
//! Runs the compiled `tasklist` binary against temporary config files and
//! checks exit status and output. No test here opens a listener.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn tasklist_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tasklist"))
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(tasklist_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("TASKLIST_CONFIG")
        .output()
        .expect("run tasklist")
}

fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content.trim()).expect("write config");
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn version_flag_prints_package_version() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["--version"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), format!("tasklist {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_check_accepts_valid_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "custom.toml",
        r#"
[server]
bind = "127.0.0.1:6000"

[store]
type = "memory"
"#,
    );
    let output = run_in(dir.path(), &["config", "check", "--config", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "config ok");
}

#[test]
fn config_check_uses_defaults_without_a_file() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["config", "check"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "config ok");
}

#[test]
fn config_check_reads_default_file_from_working_directory() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "tasklist.toml", "[server]\nmax_flash_bytes = 0\n");
    let output = run_in(dir.path(), &["config", "check"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("max_flash_bytes must be greater than zero"));
}

#[test]
fn config_check_honors_env_override() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "env.toml", "[store]\ntype = \"bogus\"\n");
    let output = Command::new(tasklist_bin())
        .args(["config", "check"])
        .current_dir(dir.path())
        .env("TASKLIST_CONFIG", &path)
        .output()
        .expect("run tasklist");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("config parse error"));
}

#[test]
fn config_check_rejects_missing_explicit_file() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["config", "check", "--config", "absent.toml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to load config"));
}

#[test]
fn serve_rejects_non_loopback_bind_before_listening() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["serve", "--bind", "0.0.0.0:0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("non-loopback bind disallowed"));
}

#[test]
fn serve_rejects_unparseable_bind_override() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["serve", "--bind", "not-an-address"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid bind address"));
}

#[test]
fn serve_loopback_override_applies_before_validation() {
    let dir = TempDir::new().unwrap();
    let audit = dir.path().join("missing").join("audit.jsonl");
    let content = format!(
        "[server]\nbind = \"0.0.0.0:0\"\n\n[server.audit]\npath = \"{}\"\n",
        audit.display()
    );
    let path = write_config(dir.path(), "public.toml", &content);
    let config = path.to_str().unwrap();

    let rejected = run_in(dir.path(), &["serve", "--config", config]);
    assert_eq!(rejected.status.code(), Some(1));
    assert!(stderr(&rejected).contains("non-loopback bind disallowed"));

    let allowed = run_in(dir.path(), &["serve", "--config", config, "--allow-non-loopback"]);
    assert_eq!(allowed.status.code(), Some(1));
    let message = stderr(&allowed);
    assert!(!message.contains("non-loopback bind disallowed"), "stderr: {message}");
    assert!(message.contains("failed to initialize server: init error"), "stderr: {message}");
}
