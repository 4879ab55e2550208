//! # tarrs CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Verifies the top-level behavior of the `tarrs` binary: `--help`,
//! `--version`, the `help` subcommand and unknown commands.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    tarrs_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tar"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_version() {
    tarrs_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_subcommand() {
    tarrs_cmd()
        .args(["help", "tar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--overwrite"));
}

#[test]
fn test_unknown_command_fails() {
    tarrs_cmd().arg("zip").assert().failure();
}
