//! # tarrs CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test crates in `cli/tests/`. Each `.rs`
//! file in that directory (other than this module) is compiled as a separate
//! test crate that runs the compiled `tarrs` binary.
//!

// Not every test file uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// # Get tarrs Command (`tarrs_cmd`)
///
/// Creates an `assert_cmd::Command` for the `tarrs` binary built for this test run.
///
/// ## Panics
/// Panics if the `tarrs` binary cannot be found via `Command::cargo_bin`.
pub fn tarrs_cmd() -> Command {
    Command::cargo_bin("tarrs").expect("Failed to find tarrs binary for testing")
}

/// # tarrs Command In Workspace (`tarrs_in`)
///
/// Like `tarrs_cmd`, but runs inside `workspace` and isolated from the host:
/// the user config directory points into the workspace and
/// `TARRS_ARTIFACTS_DIR` is cleared.
pub fn tarrs_in(workspace: &Path) -> Command {
    let mut cmd = tarrs_cmd();
    cmd.current_dir(workspace)
        .env("XDG_CONFIG_HOME", workspace.join(".test-config"))
        .env_remove("TARRS_ARTIFACTS_DIR")
        .env_remove("RUST_LOG");
    cmd
}
