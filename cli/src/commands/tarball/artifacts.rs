//! # Artifact Registration (`commands::tarball::artifacts`)
//!
//! File: cli/src/commands/tarball/artifacts.rs
//!
//! ## Overview
//!
//! When a request sets `archive`, the finished archive is handed to an
//! `ArtifactRegistrar` after the engine reports success. What registration
//! means is up to the implementation; `DirectoryRegistrar` copies the archive
//! into an artifacts directory, keeping its file name.
//!
//! A registrar that writes locally reports its directory through `location`,
//! and the engine drops everything under it from the selection. Otherwise a
//! default artifacts directory inside the workspace would feed old copies
//! into every new archive.
//!
use crate::common::fs::copy::copy_file_into;
use crate::core::error::Result;
use std::path::{Path, PathBuf};

/// Records a finished archive somewhere outside the workspace.
pub trait ArtifactRegistrar: Send + Sync {
    /// Registers `archive` and returns where it was recorded.
    fn register(&self, archive: &Path) -> Result<PathBuf>;

    /// The directory registered archives are written to, if they stay on the
    /// local filesystem. Files under it are never archived themselves.
    fn location(&self) -> Option<&Path> {
        None
    }
}

/// Copies archives into a fixed directory.
#[derive(Debug, Clone)]
pub struct DirectoryRegistrar {
    root: PathBuf,
}

impl DirectoryRegistrar {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryRegistrar { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactRegistrar for DirectoryRegistrar {
    fn register(&self, archive: &Path) -> Result<PathBuf> {
        copy_file_into(archive, &self.root)
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.root)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_directory_registrar_copies_archive() -> Result<()> {
        let ws = tempdir()?;
        let archive = ws.path().join("hello.tar");
        fs::write(&archive, "tar bytes")?;

        let registrar = DirectoryRegistrar::new(ws.path().join("artifacts"));
        let recorded = registrar.register(&archive)?;

        assert_eq!(recorded, registrar.root().join("hello.tar"));
        assert_eq!(registrar.location(), Some(registrar.root()));
        assert_eq!(fs::read_to_string(recorded)?, "tar bytes");
        Ok(())
    }
}
