//! # tarrs File Copy (`common::fs::copy`)
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Copies a single file into a directory, keeping its file name. Used by the
//! directory-backed artifact registrar to publish a finished archive.
//!
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::{Result, TarrsError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Copies `source` into `target_dir`, replacing any file of the same name.
///
/// `target_dir` is created if it does not exist.
///
/// # Returns
///
/// * `Result<PathBuf>` - The path of the copy.
///
/// # Errors
///
/// Returns an `Err` if `source` has no file name, the target directory cannot
/// be created, or the copy fails.
pub fn copy_file_into(source: &Path, target_dir: &Path) -> Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| {
        TarrsError::InvalidArgument {
            path: source.display().to_string(),
        }
    })?;
    ensure_dir_exists(target_dir)?;
    let target = target_dir.join(file_name);

    let mut options = fs_extra::file::CopyOptions::new();
    options.overwrite = true;
    fs_extra::file::copy(source, &target, &options).map_err(|e| {
        anyhow::anyhow!(e).context(format!(
            "Failed to copy {:?} to {:?}",
            source, target
        ))
    })?;

    info!("Copied {:?} to {:?}", source, target);
    Ok(target)
}
