//! # tarrs Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks that know nothing about requests or globs, kept
//! apart from command logic (`commands::`) and core infrastructure (`core::`).
//!
//! - **`archive`**: Tar stream writing and the optional gzip layer.
//! - **`fs`**: Directory creation, exclusive file creation, path canonicalization, file copy.
//!

/// Tar/tar.gz stream writing.
pub mod archive;
/// Filesystem helpers (I/O, paths, copy).
pub mod fs;
