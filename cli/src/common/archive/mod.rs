//! # tarrs Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Low-level archive building blocks, independent of how files are selected:
//!
//! - **`tar`**: `TarStreamWriter`, which appends files as tar entries and
//!   reports entry and byte totals.
//! - **`compression`**: `OutputEncoder`, the optional gzip layer underneath
//!   the tar stream.
//!
//! The `tarrs tar` command composes these with file selection and the
//! destination checks in `commands::tarball`.
//!

pub mod compression;
pub mod tar;
