//! `flagrun config` end-to-end tests against a temp config file.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn flagrun(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("flagrun"));
    cmd.env("NO_COLOR", "1");
    cmd.env("FLAGRUN_CONFIG", dir.path().join("config.yaml"));
    cmd.env("FLAGRUN_SESSION", dir.path().join("session.json"));
    cmd
}

#[test]
fn test_config_show_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    flagrun(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:3001/api"));
}

#[test]
fn test_config_set_then_show_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    flagrun(&dir)
        .args(["config", "set", "api.base_url", "https://ctf.example.org/api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set api.base_url"));

    flagrun(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://ctf.example.org/api"));
}

#[test]
fn test_config_show_json_is_parseable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = flagrun(&dir)
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output).expect("config show --json emits valid JSON");
    assert_eq!(
        parsed["api"]["base_url"],
        serde_json::json!("http://localhost:3001/api")
    );
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    flagrun(&dir)
        .args(["config", "set", "ui.theme", "neon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn test_config_set_rejects_non_url_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    flagrun(&dir)
        .args(["config", "set", "api.base_url", "not-a-url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));
}
