//! Integration tests for the credhub CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! No CredHub server is available, so they cover argument handling,
//! configuration errors and commands that never touch the network.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: the credhub binary with an isolated config dir and no
/// server/token inherited from the environment.
fn credhub(config_dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("credhub").expect("binary should exist");
    cmd.env("CREDHUB_CONFIG_DIR", config_dir.path())
        .env_remove("CREDHUB_SERVER")
        .env_remove("CREDHUB_TOKEN")
        .env_remove("CREDHUB_CA_CERT")
        .env_remove("CREDHUB_CLIENT_CERT")
        .env_remove("CREDHUB_CLIENT_KEY");
    cmd
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    credhub(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CredHub credential manager"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("find"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag_shows_version() {
    let tmp = TempDir::new().unwrap();
    credhub(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("credhub"));
}

#[test]
fn no_args_shows_help() {
    let tmp = TempDir::new().unwrap();
    credhub(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn version_command_reports_configured_server() {
    let tmp = TempDir::new().unwrap();
    tmp.child("config.toml")
        .write_str("server = \"https://credhub.example.com:8844\"\n")
        .unwrap();

    credhub(&tmp)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("CLI Version"))
        .stdout(predicate::str::contains("https://credhub.example.com:8844"));
}

#[test]
fn get_without_server_fails() {
    let tmp = TempDir::new().unwrap();
    credhub(&tmp)
        .args(["get", "-n", "/example-password", "--token", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no server configured"));
}

#[test]
fn get_without_credentials_fails() {
    let tmp = TempDir::new().unwrap();
    credhub(&tmp)
        .args([
            "get",
            "-n",
            "/example-password",
            "--server",
            "https://127.0.0.1:1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not authenticated"));
}

#[test]
fn get_rejects_relative_name() {
    let tmp = TempDir::new().unwrap();
    credhub(&tmp)
        .args(["get", "-n", "example-password"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with '/'"));
}

#[test]
fn get_requires_name_or_id() {
    let tmp = TempDir::new().unwrap();
    credhub(&tmp).arg("get").assert().failure();
}

#[test]
fn get_against_unreachable_server_fails() {
    let tmp = TempDir::new().unwrap();
    credhub(&tmp)
        .args([
            "get",
            "-n",
            "/example-password",
            "--server",
            "http://127.0.0.1:1",
            "--token",
            "abc",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn malformed_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    tmp.child("config.toml")
        .write_str("not valid {{toml")
        .unwrap();

    credhub(&tmp)
        .arg("version")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn find_help_shows_queries() {
    let tmp = TempDir::new().unwrap();
    credhub(&tmp)
        .args(["find", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name-like"))
        .stdout(predicate::str::contains("all-paths"));
}

#[test]
fn completions_for_bash() {
    let tmp = TempDir::new().unwrap();
    credhub(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("credhub"));
}

#[test]
fn completions_for_unknown_shell_are_rejected_by_the_parser() {
    let tmp = TempDir::new().unwrap();
    credhub(&tmp)
        .args(["completions", "csh"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'csh'"))
        .stderr(predicate::str::contains("possible values"));
}
