//! Behavior that must hold without a backend: input validation and the
//! not-logged-in paths. Each test points the binary at a temp home so the
//! real session and config files stay untouched.

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
fn test_logout_without_session_is_clean() {
    let dir = tempfile::tempdir().expect("tempdir");
    flagrun(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_profile_without_session_fails_with_login_hint() {
    let dir = tempfile::tempdir().expect("tempdir");
    flagrun(&dir)
        .arg("profile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("flagrun login"));
}

#[test]
fn test_machine_start_without_session_fails_with_login_hint() {
    let dir = tempfile::tempdir().expect("tempdir");
    flagrun(&dir)
        .args(["machine", "start", "q-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("flagrun login"));
}

#[test]
fn test_question_rejects_malformed_id_before_any_request() {
    let dir = tempfile::tempdir().expect("tempdir");
    flagrun(&dir)
        .args(["question", "../etc/passwd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid question id"));
}

#[test]
fn test_questions_rejects_malformed_genre_id() {
    let dir = tempfile::tempdir().expect("tempdir");
    flagrun(&dir)
        .args(["questions", "a b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid genre id"));
}

#[test]
fn test_submit_rejects_blank_flag() {
    let dir = tempfile::tempdir().expect("tempdir");
    flagrun(&dir)
        .args(["submit", "q-1", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Flag cannot be empty"));
}

#[test]
fn test_login_without_terminal_requires_flag_credentials() {
    let dir = tempfile::tempdir().expect("tempdir");
    // stdin is not a TTY here, so the prompt path must bail with guidance.
    flagrun(&dir)
        .arg("login")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--email"));
}
