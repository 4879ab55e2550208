//! # Overwrite Check (`commands::tarball::overwrite`)
//!
//! File: cli/src/commands/tarball/overwrite.rs
//!
//! ## Overview
//!
//! Runs before any archive bytes are written:
//!
//! | destination | overwrite | result                               |
//! |-------------|-----------|--------------------------------------|
//! | exists      | false     | `AlreadyExists` ("<path> exists.")    |
//! | exists      | true      | deleted; `Io` if deletion fails      |
//! | absent      | either    | nothing to do                        |
//!
use crate::commands::tarball::guard::ResolvedDestination;
use crate::core::error::{Result, TarrsError};
use tracing::info;

/// # Prepare Destination (`prepare_destination`)
///
/// Applies the overwrite policy to `destination`.
///
/// ## Errors
///
/// - `TarrsError::AlreadyExists` if the destination exists and `overwrite` is false.
/// - `TarrsError::Io` ("Failed to delete ...") if the existing destination cannot be removed.
pub fn prepare_destination(destination: &ResolvedDestination, overwrite: bool) -> Result<()> {
    if !destination.existed_before {
        return Ok(());
    }
    if !overwrite {
        anyhow::bail!(TarrsError::AlreadyExists {
            path: destination.display.clone(),
        });
    }

    std::fs::remove_file(&destination.path).map_err(|e| {
        TarrsError::io(format!("Failed to delete {}", destination.display), e)
    })?;
    info!("Deleted existing {}", destination.display);
    Ok(())
}
