//! # Archive Request (`commands::tarball::request`)
//!
//! File: cli/src/commands/tarball/request.rs
//!
//! ## Overview
//!
//! `ArchiveRequest` is the single typed input of the archive engine: which
//! files to take (base directory plus include/exclude globs), where to write
//! the archive, and the compress/overwrite/archive flags.
//!
//! Relative `base_dir` and `dest_path` values are resolved against
//! `workspace`, the caller's working directory. An empty `base_dir` means the
//! workspace itself.
//!
use crate::core::error::{Result, TarrsError};
use std::path::{Path, PathBuf};

/// A fully specified archive operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
    /// Directory that relative `base_dir` and `dest_path` are resolved against.
    pub workspace: PathBuf,
    /// Root of the file selection. Empty means `workspace`.
    pub base_dir: PathBuf,
    /// Ant-style include patterns (comma separated). Empty means `**`.
    pub include_glob: String,
    /// Ant-style exclude patterns (comma separated). May be empty.
    pub exclude_glob: String,
    /// Also drop the built-in VCS/metadata patterns.
    pub default_excludes: bool,
    /// Archive path as the caller spelled it.
    pub dest_path: String,
    pub compress: bool,
    pub overwrite: bool,
    /// Register the finished archive with the artifact registrar.
    pub archive: bool,
}

impl ArchiveRequest {
    /// A request for everything under `workspace`, gzip-compressed, no overwrite.
    pub fn new(workspace: impl Into<PathBuf>, dest_path: impl Into<String>) -> Self {
        ArchiveRequest {
            workspace: workspace.into(),
            base_dir: PathBuf::new(),
            include_glob: String::new(),
            exclude_glob: String::new(),
            default_excludes: true,
            dest_path: dest_path.into(),
            compress: true,
            overwrite: false,
            archive: false,
        }
    }

    /// Rejects requests that must fail before touching the filesystem.
    pub fn validate(&self) -> Result<()> {
        if self.dest().is_empty() {
            anyhow::bail!(TarrsError::Validation("Can not be empty".to_string()));
        }
        Ok(())
    }

    /// The destination with surrounding whitespace removed.
    pub fn dest(&self) -> &str {
        self.dest_path.trim()
    }

    /// The base directory resolved against the workspace.
    pub fn base_path(&self) -> PathBuf {
        resolve_base(&self.workspace, &self.base_dir)
    }
}

/// Joins `base_dir` onto `workspace`; an empty `base_dir` is the workspace itself.
pub fn resolve_base(workspace: &Path, base_dir: &Path) -> PathBuf {
    if base_dir.as_os_str().is_empty() {
        workspace.to_path_buf()
    } else {
        workspace.join(base_dir)
    }
}
