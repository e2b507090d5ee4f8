//! End-to-end tests for the scicalc-rs binary.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn scicalc() -> Command {
    let mut cmd = Command::cargo_bin("scicalc-rs").expect("binary built");
    cmd.env_remove("SCICALC_CONFIG")
        .env_remove("SCICALC_HISTORY_LIMIT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_eval_prints_result() {
    scicalc()
        .args(["eval", "2^10 + 5%2"])
        .assert()
        .success()
        .stdout("1025\n");
}

#[test]
fn test_eval_degrees_flag() {
    scicalc()
        .args(["eval", "--degrees", "sin(90)"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_eval_error_exit_code() {
    scicalc()
        .args(["eval", "1/0"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("division by zero"));
}

#[test]
fn test_eval_error_json_on_stdout() {
    scicalc()
        .args(["--format", "json", "eval", "foo(1)"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"kind\": \"disallowed_identifier\""));
}

#[test]
fn test_keys_replay() {
    scicalc()
        .args(["keys", "3", "+", "4", "=", "M+", "C", "MR", "n!"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("5040\n"))
        .stdout(predicate::str::contains("Memory: 7"))
        .stdout(predicate::str::contains("3+4 = 7"));
}

#[test]
fn test_history_limit_env() {
    scicalc()
        .env("SCICALC_HISTORY_LIMIT", "1")
        .args(["keys", "1", "=", "C", "2", "="])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 = 2"))
        .stdout(predicate::str::contains("1 = 1").not());
}

#[test]
fn test_repl_session() {
    scicalc()
        .arg("repl")
        .write_stdin("6 × 7 =\n:history\n:quit\n9 =\n")
        .assert()
        .success()
        .stdout("42\nHistory:\n  6×7 = 42\n");
}

#[test]
fn test_verbose_logs_to_stderr() {
    scicalc()
        .args(["--verbose", "eval", "1+1"])
        .assert()
        .success()
        .stdout("2\n")
        .stderr(predicate::str::contains("evaluated"));
}
