//! # Report Lines (`commands::tarball::report`)
//!
//! File: cli/src/commands/tarball/report.rs
//!
//! ## Overview
//!
//! Builds the user-facing progress and result text of an archive run, and the
//! `ArchiveOutcome` value handed back to the caller.
//!
use std::path::Path;

/// Result of a successful archive run. Built once by the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOutcome {
    pub entry_count: usize,
    /// Bytes written to the destination file (after compression).
    pub bytes_written: u64,
    pub succeeded: bool,
    pub message: String,
}

impl ArchiveOutcome {
    pub fn success(entry_count: usize, bytes_written: u64, compress: bool) -> Self {
        ArchiveOutcome {
            entry_count,
            bytes_written,
            succeeded: true,
            message: summarize(entry_count, compress),
        }
    }
}

/// Line printed before the file walk starts.
pub fn start_line(
    base: &Path,
    include_glob: &str,
    exclude_glob: &str,
    dest: &str,
    compress: bool,
) -> String {
    let verb = if compress { "Compress" } else { "Tar" };
    format!(
        "{} {} filtered by [{}] - [{}] to {}",
        verb,
        base.display(),
        include_glob,
        exclude_glob,
        dest
    )
}

/// Final count line, e.g. "Compressed 3 entries.".
pub fn summarize(entry_count: usize, compress: bool) -> String {
    if compress {
        format!("Compressed {} entries.", entry_count)
    } else {
        format!("Tarred {} entries.", entry_count)
    }
}

/// Line printed before the archive is handed to the artifact registrar.
pub fn archiving_line(dest: &str) -> String {
    format!("Archiving {}", dest)
}
