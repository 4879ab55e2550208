//! # tarrs Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! This module groups the filesystem helpers shared by the archive engine and
//! the artifact registrar.
//!
//! ## Architecture
//!
//! - **`copy`**: Copies a finished archive into an artifacts directory, using the `fs_extra` crate.
//! - **`io`**: Directory creation (`ensure_dir_exists`) and exclusive file creation (`create_new_file`).
//! - **`paths`**: Lexical normalization, lenient canonicalization, and `/`-separated relative paths.
//!
//! Functions are imported from the specific submodule
//! (e.g., `crate::common::fs::paths::canonicalize_lenient`).
//!

pub mod copy;
pub mod io;
pub mod paths;
