//! # tarrs List Command Integration Tests
//!
//! File: cli/tests/list.rs
//!
//! ## Overview
//!
//! Verifies that `tarrs list` prints the same selection `tarrs tar` would
//! archive, one relative path per line.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_list_applies_globs_and_default_excludes() {
    let ws = tempdir().unwrap();
    fs::create_dir_all(ws.path().join("src/.git")).unwrap();
    fs::write(ws.path().join("src/main.rs"), "").unwrap();
    fs::write(ws.path().join("src/notes.md"), "").unwrap();
    fs::write(ws.path().join("src/.git/HEAD"), "").unwrap();

    tarrs_in(ws.path())
        .args(["list", "--dir", "src", "--glob", "**/*.rs,**/HEAD"])
        .assert()
        .success()
        .stdout("main.rs\n");
}

#[test]
fn test_list_without_default_excludes() {
    let ws = tempdir().unwrap();
    fs::write(ws.path().join(".gitignore"), "").unwrap();
    fs::write(ws.path().join("a.txt"), "").unwrap();

    tarrs_in(ws.path())
        .args(["ls", "--default-excludes", "false"])
        .assert()
        .success()
        .stdout(".gitignore\na.txt\n");
}

#[test]
fn test_list_include_dirs() {
    let ws = tempdir().unwrap();
    fs::create_dir(ws.path().join("docs")).unwrap();
    fs::write(ws.path().join("docs/index.md"), "").unwrap();

    tarrs_in(ws.path())
        .args(["list", "--include-dirs", "--dir", "docs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("index.md"));
}

#[test]
fn test_list_file_as_base_dir() {
    let ws = tempdir().unwrap();
    fs::write(ws.path().join("file.txt"), "").unwrap();

    tarrs_in(ws.path())
        .args(["list", "--dir", "file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));
}
