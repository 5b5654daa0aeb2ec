//! CLI structure and argument parsing tests.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn flagrun() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("flagrun"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    flagrun().assert().code(2).stderr(predicate::str::contains(
        "Terminal client for the Flagrun CTF platform",
    ));
}

#[test]
fn test_cli_help_flag_shows_help() {
    flagrun()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    flagrun()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("flagrun"));
}

#[test]
fn test_version_command_shows_version() {
    flagrun()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("flagrun 0.3.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    flagrun()
        .arg("version")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""version":"0.3.0""#));
}

// --- Command hierarchy tests ---

#[test]
fn test_help_lists_all_commands() {
    for command in [
        "login",
        "logout",
        "profile",
        "genres",
        "questions",
        "question",
        "submit",
        "leaderboard",
        "machine",
        "config",
        "version",
    ] {
        flagrun()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains(command));
    }
}

#[test]
fn test_machine_help_lists_subcommands() {
    for sub in ["start", "stop", "extend", "status", "watch"] {
        flagrun()
            .args(["machine", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains(sub));
    }
}

#[test]
fn test_unknown_command_fails() {
    flagrun()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_machine_watch_requires_question_id() {
    flagrun()
        .args(["machine", "watch"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("question_id"));
}

#[test]
fn test_submit_requires_flag_argument() {
    flagrun()
        .args(["submit", "q-1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("flag"));
}

#[test]
fn test_global_flags_accepted_after_subcommand() {
    flagrun()
        .args(["version", "--json", "--quiet", "--no-color"])
        .assert()
        .success();
}
