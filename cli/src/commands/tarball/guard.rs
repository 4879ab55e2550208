//! # Self-Reference Guard (`commands::tarball::guard`)
//!
//! File: cli/src/commands/tarball/guard.rs
//!
//! ## Overview
//!
//! Keeps an archive from being packed into itself. The destination is
//! resolved to its canonical path once per request; any candidate whose
//! canonical path is the same file is dropped, however either path was
//! spelled (`src/../src/output.tgz`, `./src//output.tgz`, a symlinked parent).
//!
//! Only that one file is removed. A file that merely shares the destination's
//! name in another directory is archived normally.
//!
//! `exclude_tree` applies the same canonical comparison to a whole directory
//! (the artifacts directory), dropping every candidate below it.
//!
use crate::commands::tarball::select::CandidateEntry;
use crate::common::fs::paths::canonicalize_lenient;
use crate::core::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The archive destination, resolved once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDestination {
    /// The destination as the caller spelled it (used in messages).
    pub display: String,
    /// `workspace` joined with the caller's spelling.
    pub path: PathBuf,
    /// Symlink-resolved, normalized absolute path.
    pub canonical_path: PathBuf,
    /// Whether something already existed at `path` when resolved.
    pub existed_before: bool,
}

/// # Resolve Destination (`resolve_destination`)
///
/// Resolves `dest_path` against `workspace` and canonicalizes it. The
/// destination does not need to exist.
///
/// ## Errors
///
/// Returns a `TarrsError::Io` if an existing part of the path cannot be
/// resolved (e.g., permission denied).
pub fn resolve_destination(workspace: &Path, dest_path: &str) -> Result<ResolvedDestination> {
    let path = workspace.join(dest_path);
    // symlink_metadata so a dangling symlink still counts as "exists".
    let existed_before = std::fs::symlink_metadata(&path).is_ok();
    let canonical_path = canonicalize_lenient(&path)?;
    debug!(
        "Destination {} resolves to {} (exists: {})",
        dest_path,
        canonical_path.display(),
        existed_before
    );
    Ok(ResolvedDestination {
        display: dest_path.to_string(),
        path,
        canonical_path,
        existed_before,
    })
}

/// # Exclude Destination (`exclude_self`)
///
/// Returns `candidates` without the entry (if any) that is the destination
/// file, preserving order.
///
/// ## Errors
///
/// Returns a `TarrsError::Io` if a candidate cannot be canonicalized.
pub fn exclude_self(
    candidates: Vec<CandidateEntry>,
    destination: &ResolvedDestination,
) -> Result<Vec<CandidateEntry>> {
    let mut kept = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let canonical = canonicalize_lenient(&candidate.absolute_path)?;
        if canonical == destination.canonical_path {
            info!(
                "Not archiving {}: it is the archive destination",
                candidate.relative_path
            );
            continue;
        }
        kept.push(candidate);
    }
    Ok(kept)
}

/// # Exclude Directory Tree (`exclude_tree`)
///
/// Returns `candidates` without the entries that live under `root` (compared
/// by canonical path), preserving order. `root` does not need to exist.
///
/// ## Errors
///
/// Returns a `TarrsError::Io` if `root` or a candidate cannot be canonicalized.
pub fn exclude_tree(candidates: Vec<CandidateEntry>, root: &Path) -> Result<Vec<CandidateEntry>> {
    let root = canonicalize_lenient(root)?;
    let mut kept = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let canonical = canonicalize_lenient(&candidate.absolute_path)?;
        if canonical.starts_with(&root) {
            info!(
                "Not archiving {}: it is under the artifacts directory",
                candidate.relative_path
            );
            continue;
        }
        kept.push(candidate);
    }
    Ok(kept)
}
