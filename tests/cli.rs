//! CLI argument and configuration validation tests — no network I/O.
//!
//! Every failure here happens before a fetcher is consulted.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catsays");
    cmd.env("CATSAYS_CONFIG", "/nonexistent/catsays/config.toml")
        .env_remove("CATSAYS_BASE_URL")
        .env_remove("CATSAYS_REPLAY")
        .env_remove("CATSAYS_REC");
    cmd
}

#[test]
fn zero_width_exits_with_error() {
    cmd().args(["--width", "0"]).assert().failure().stderr(predicate::str::contains("width"));
}

#[test]
fn oversized_canvas_exits_before_fetching() {
    // No cassette and an unroutable service: a fetch attempt would fail differently.
    cmd()
        .env("CATSAYS_BASE_URL", "http://127.0.0.1:9/")
        .args(["--width", "100000", "--height", "100000"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("Invalid argument").and(predicate::str::contains("Canvas")),
        );
}

#[test]
fn unknown_format_exits_with_error() {
    cmd()
        .args(["--format", "gif"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'gif'"));
}

#[test]
fn invalid_config_file_exits_with_error() {
    let dir = std::env::temp_dir().join("catsays_cli_bad_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[service\nbase_url = ").unwrap();

    cmd()
        .env("CATSAYS_CONFIG", path.to_str().unwrap())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config error"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_base_url_exits_with_error() {
    cmd()
        .env("CATSAYS_BASE_URL", "not a url")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid service URL"));
}

#[test]
fn missing_cassette_exits_with_error() {
    cmd()
        .env("CATSAYS_REPLAY", "/nonexistent/fetch.cassette.yaml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cassette error"));
}

#[test]
fn help_lists_flags() {
    cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("--greeting")
            .and(predicate::str::contains("--who"))
            .and(predicate::str::contains("--color")),
    );
}
