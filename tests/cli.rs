// Argument-surface tests for the refsum binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn version_prints_a_version() {
    Command::cargo_bin("refsum")
        .unwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(".").or(predicate::str::contains("dev")));
}

#[test]
fn referendum_without_ref_fails_at_parse_time() {
    Command::cargo_bin("refsum")
        .unwrap()
        .arg("referendum")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--ref"));
}

#[test]
fn referendum_with_non_integer_ref_fails_at_parse_time() {
    Command::cargo_bin("refsum")
        .unwrap()
        .args(["referendum", "--ref", "abc"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("refsum")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(2);
}
