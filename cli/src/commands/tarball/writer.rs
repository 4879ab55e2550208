//! # Archive Writer (`commands::tarball::writer`)
//!
//! File: cli/src/commands/tarball/writer.rs
//!
//! ## Overview
//!
//! Creates the destination file and streams the selected files into it as a
//! tar (or tar.gz) archive, in selection order.
//!
//! The destination is opened with exclusive creation; the overwrite check has
//! already removed any previous file. If writing fails midway the partial
//! file is left where it is and the error is returned.
//!
use crate::commands::tarball::guard::ResolvedDestination;
use crate::commands::tarball::report::ArchiveOutcome;
use crate::commands::tarball::select::CandidateEntry;
use crate::common::archive::tar::TarStreamWriter;
use crate::common::fs::io::{create_new_file, ensure_dir_exists};
use crate::core::error::Result;
use tracing::{debug, info};

/// # Write Archive (`write`)
///
/// Streams `candidates` into `destination`, gzip-compressed when `compress`
/// is set. Directory entries in `candidates` are skipped. Missing parent
/// directories of the destination are created.
///
/// ## Errors
///
/// Returns an `Err` if the destination cannot be created or any entry cannot
/// be read or written.
pub fn write(
    candidates: &[CandidateEntry],
    destination: &ResolvedDestination,
    compress: bool,
) -> Result<ArchiveOutcome> {
    if let Some(parent) = destination.path.parent() {
        ensure_dir_exists(parent)?;
    }
    let file = create_new_file(&destination.path)?;

    let mut writer = TarStreamWriter::new(file, compress);
    for candidate in candidates.iter().filter(|c| !c.is_directory) {
        writer.append_file(&candidate.absolute_path, &candidate.relative_path)?;
    }
    debug!("Appended {} entries, finishing archive", writer.entries());
    let (_file, summary) = writer.finish()?;

    info!(
        "Wrote {} entries ({} bytes) to {}",
        summary.entries,
        summary.bytes_written,
        destination.path.display()
    );
    Ok(ArchiveOutcome::success(
        summary.entries,
        summary.bytes_written,
        compress,
    ))
}
