//! # tarrs Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the tarrs CLI. Each
//! command defines its own arguments structure and an async handler called
//! from `main.rs`.
//!
//! ## Commands
//!
//! - `tarball`: `tarrs tar`, the archive engine and its pipeline steps
//! - `list`: `tarrs list`, prints the file selection without writing anything
//!

/// `tarrs list`: print the files a `tar` run would select.
pub mod list;
/// `tarrs tar`: build a tar/tar.gz archive from a glob selection.
pub mod tarball;
