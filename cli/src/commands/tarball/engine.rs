//! # Archive Engine (`commands::tarball::engine`)
//!
//! File: cli/src/commands/tarball/engine.rs
//!
//! ## Overview
//!
//! Runs one `ArchiveRequest` end to end. This is blocking, single-threaded
//! code; the command handler decides which thread it runs on.
//!
//! ## Flow
//!
//! 1. Validate the request (empty destination fails here, before any walk).
//! 2. Report the start line.
//! 3. Select files under the base directory (`select`).
//! 4. Resolve the destination and drop it from the selection, along with
//!    anything under the registrar's artifacts directory (`guard`).
//! 5. Apply the overwrite policy (`overwrite`).
//! 6. Stream the selection into the destination (`writer`).
//! 7. Report the summary, then register the archive if requested (`artifacts`).
//!
//! Any failure stops the run and is returned as-is; nothing is retried.
//!
use crate::commands::tarball::artifacts::ArtifactRegistrar;
use crate::commands::tarball::request::ArchiveRequest;
use crate::commands::tarball::{guard, overwrite, report, select, writer};
use crate::core::error::{Result, TarrsError};
use std::io::Write;
use tracing::{info, warn};

/// # Execute Request (`execute`)
///
/// Builds the archive described by `request`, writing progress and result
/// lines to `out`.
///
/// ## Arguments
///
/// * `request` - What to archive and where.
/// * `registrar` - Receives the archive when `request.archive` is set. With
///   `None` the archiving step is reported but skipped.
/// * `out` - Destination for the human-readable report lines.
///
/// ## Returns
///
/// * `Result<report::ArchiveOutcome>` - Entry and byte counts plus the summary line.
///
/// ## Errors
///
/// Returns the first `TarrsError` raised by any phase (see the module docs).
pub fn execute(
    request: &ArchiveRequest,
    registrar: Option<&dyn ArtifactRegistrar>,
    out: &mut dyn Write,
) -> Result<report::ArchiveOutcome> {
    request.validate()?;
    let base = request.base_path();
    emit(
        out,
        &report::start_line(
            &base,
            &request.include_glob,
            &request.exclude_glob,
            request.dest(),
            request.compress,
        ),
    )?;

    let candidates = select::select(
        &base,
        &request.include_glob,
        &request.exclude_glob,
        request.default_excludes,
    )?;
    let destination = guard::resolve_destination(&request.workspace, request.dest())?;
    let candidates = guard::exclude_self(candidates, &destination)?;
    let candidates = match registrar.and_then(|r| r.location()) {
        Some(artifacts) => guard::exclude_tree(candidates, artifacts)?,
        None => candidates,
    };
    overwrite::prepare_destination(&destination, request.overwrite)?;

    let outcome = writer::write(&candidates, &destination, request.compress)?;
    emit(out, &outcome.message)?;

    if request.archive {
        emit(out, &report::archiving_line(request.dest()))?;
        match registrar {
            Some(registrar) => {
                let recorded = registrar.register(&destination.path)?;
                info!("Registered artifact at {}", recorded.display());
            }
            None => warn!("No artifact registrar configured; skipping registration."),
        }
    }

    Ok(outcome)
}

fn emit(out: &mut dyn Write, line: &str) -> Result<()> {
    writeln!(out, "{}", line).map_err(|e| TarrsError::io("Failed to write report", e))?;
    Ok(())
}
