//! # tarrs Filesystem I/O (`common::fs::io`)
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` that add context to errors and log what
//! they did. Used by the archive writer (parent directory creation, exclusive
//! file creation) and the artifact registrar.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//! # fn run(path: &std::path::Path) -> crate::core::error::Result<()> {
//! io::ensure_dir_exists(path.parent().unwrap())?;
//! let file = io::create_new_file(path)?;
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{Result, TarrsError};
use anyhow::Context;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function creates the directory including
/// any missing parents (like `mkdir -p`). If the path exists but is not a
/// directory, a `TarrsError::InvalidArgument` is returned.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(TarrsError::InvalidArgument {
            path: path.display().to_string(),
        });
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Creates `path` for writing, failing if anything already exists there.
///
/// The handle is closed when dropped, on every exit path of the caller.
///
/// # Errors
///
/// Returns a `TarrsError::AlreadyExists` if the path appeared after the caller
/// checked it, and a `TarrsError::Io` for any other open failure.
pub fn create_new_file(path: &Path) -> Result<File> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => {
            debug!("Created file: {:?}", path);
            Ok(file)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            anyhow::bail!(TarrsError::AlreadyExists {
                path: path.display().to_string(),
            })
        }
        Err(e) => Err(TarrsError::io(
            format!("Failed to create {}", path.display()),
            e,
        )
        .into()),
    }
}
