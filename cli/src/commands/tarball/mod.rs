//! # tarrs Tar Command (`commands::tarball`)
//!
//! File: cli/src/commands/tarball/mod.rs
//!
//! ## Overview
//!
//! This module implements `tarrs tar`: pack the files under a base directory
//! that match an Ant-style glob into a tar or tar.gz archive, without ever
//! packing the archive into itself, and refusing to clobber an existing
//! archive unless asked to.
//!
//! ## Architecture
//!
//! The command is split into one submodule per step of the pipeline:
//! - `request.rs`: The typed `ArchiveRequest` and its validation
//! - `select.rs`: Ant-style file selection, including the default excludes
//! - `guard.rs`: Destination canonicalization and self-exclusion
//! - `overwrite.rs`: The fail-or-delete policy for an existing destination
//! - `writer.rs`: Streams the selection into the destination file
//! - `report.rs`: Report lines and the `ArchiveOutcome` value
//! - `artifacts.rs`: Registration of the finished archive
//! - `engine.rs`: Runs the steps above in order
//!
//! `handle_tar` turns CLI arguments and configuration into an
//! `ArchiveRequest` and runs the blocking engine on Tokio's blocking pool.
//!
//! ## Examples
//!
//! ```bash
//! # Gzip everything under ./build into dist/build.tgz
//! tarrs tar --file dist/build.tgz --dir build
//!
//! # Plain tar of all text files, replacing an older archive
//! tarrs tar -f texts.tar --glob '**/*.txt' --compress false --overwrite true
//!
//! # Keep VCS metadata and copy the result into the artifacts directory
//! tarrs tar -f src.tgz --dir src --default-excludes false --archive true
//! ```
//!
use crate::core::config::{self, Config};
use crate::core::error::Result;
use anyhow::Context;
use clap::{Args, Parser};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod artifacts;
pub mod engine;
pub mod guard;
pub mod overwrite;
pub mod report;
pub mod request;
pub mod select;
pub mod writer;

use artifacts::{ArtifactRegistrar, DirectoryRegistrar};
use request::ArchiveRequest;

/// # File Selection Arguments (`SelectionArgs`)
///
/// Arguments shared by every command that selects files (`tar`, `list`).
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Working directory that relative paths are resolved against (defaults to the current directory).
    #[arg(short = 'C', long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Base directory of the selection, relative to the workspace (defaults to the workspace).
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Ant-style include patterns, comma separated. Empty means everything (`**`).
    #[arg(short, long, default_value = "")]
    pub glob: String,

    /// Ant-style exclude patterns, comma separated.
    #[arg(short, long, default_value = "")]
    pub exclude: String,

    /// Drop VCS and OS metadata files (.git, .svn, .DS_Store, ...). Defaults to true.
    #[arg(long, value_name = "BOOL")]
    pub default_excludes: Option<bool>,
}

impl SelectionArgs {
    /// The workspace directory as an absolute path, falling back to the
    /// process working directory.
    pub fn resolve_workspace(&self) -> Result<PathBuf> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(match &self.workspace {
            Some(dir) => current_dir.join(dir),
            None => current_dir,
        })
    }

    /// The selection's base directory: `--dir` resolved against `workspace`.
    pub fn base_path(&self, workspace: &Path) -> PathBuf {
        request::resolve_base(workspace, self.dir.as_deref().unwrap_or(Path::new("")))
    }
}

/// # Tar Command Arguments (`TarArgs`)
///
/// Defines the command-line arguments accepted by `tarrs tar`. Boolean flags
/// take an explicit value (`--compress false`) so that an unset flag can fall
/// back to the configuration file.
#[derive(Parser, Debug)]
#[command(about = "Create a tar or tar.gz archive from files matching a glob")]
pub struct TarArgs {
    /// Archive path, relative to the workspace.
    #[arg(short, long)]
    pub file: String,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Gzip the archive. Defaults to true.
    #[arg(long, value_name = "BOOL")]
    pub compress: Option<bool>,

    /// Replace an existing archive. Defaults to false.
    #[arg(long, value_name = "BOOL")]
    pub overwrite: Option<bool>,

    /// Copy the finished archive into the artifacts directory. Defaults to false.
    #[arg(long, value_name = "BOOL")]
    pub archive: Option<bool>,

    /// Artifacts directory used with `--archive true`, relative to the workspace.
    #[arg(long, env = "TARRS_ARTIFACTS_DIR", value_name = "DIR")]
    pub artifacts_dir: Option<PathBuf>,
}

/// Merges CLI arguments over configuration defaults.
fn build_request(args: &TarArgs, cfg: &Config, workspace: PathBuf) -> ArchiveRequest {
    ArchiveRequest {
        workspace,
        base_dir: args.selection.dir.clone().unwrap_or_default(),
        include_glob: args.selection.glob.clone(),
        exclude_glob: args.selection.exclude.clone(),
        default_excludes: args
            .selection
            .default_excludes
            .unwrap_or(cfg.default_excludes()),
        dest_path: args.file.clone(),
        compress: args.compress.unwrap_or(cfg.compress()),
        overwrite: args.overwrite.unwrap_or(cfg.overwrite()),
        archive: args.archive.unwrap_or(cfg.archive()),
    }
}

/// # Handle Tar Command (`handle_tar`)
///
/// The entry point for `tarrs tar`.
///
/// 1. Loads configuration and merges it with the arguments into an `ArchiveRequest`.
/// 2. Builds the `DirectoryRegistrar` for the artifacts directory.
/// 3. Runs `engine::execute` on Tokio's blocking thread pool, printing the
///    report lines to stdout.
///
/// ## Errors
///
/// Propagates configuration errors and every engine failure unchanged, so
/// `main` prints the engine's message verbatim.
pub async fn handle_tar(args: TarArgs) -> Result<()> {
    info!("Handling tar command with args: {:?}", args);

    let workspace = args.selection.resolve_workspace()?;
    let cfg = config::load_config(&workspace)?;
    let artifacts_dir = workspace.join(
        args.artifacts_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(cfg.artifacts_dir())),
    );
    let request = build_request(&args, &cfg, workspace);
    debug!("Archive request: {:?}", request);

    let registrar = DirectoryRegistrar::new(artifacts_dir);
    debug!("Artifacts directory: {}", registrar.root().display());
    let outcome = tokio::task::spawn_blocking(move || {
        let mut stdout = std::io::stdout();
        engine::execute(
            &request,
            Some(&registrar as &dyn ArtifactRegistrar),
            &mut stdout,
        )
    })
    .await
    .context("Archive task failed unexpectedly")??;

    if outcome.succeeded {
        info!(
            "Archive finished: {} entries, {} bytes",
            outcome.entry_count, outcome.bytes_written
        );
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TarDefaults;

    fn parse(argv: &[&str]) -> TarArgs {
        TarArgs::try_parse_from(argv).expect("arguments should parse")
    }

    #[test]
    fn test_cli_flags_override_config() {
        let args = parse(&["tar", "-f", "out.tar", "--compress", "false", "--overwrite", "true"]);
        let cfg = Config {
            tar: TarDefaults {
                compress: Some(true),
                overwrite: Some(false),
                archive: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };

        let request = build_request(&args, &cfg, PathBuf::from("/ws"));
        assert!(!request.compress);
        assert!(request.overwrite);
        assert!(request.archive); // From config
        assert!(request.default_excludes); // Built-in default
        assert_eq!(request.dest_path, "out.tar");
    }

    #[test]
    fn test_selection_args() {
        let args = parse(&[
            "tar", "-f", "o.tgz", "-C", "/ws", "--dir", "src", "--glob", "**/*.rs", "--exclude",
            "target/", "--default-excludes", "false",
        ]);
        let request = build_request(&args, &Config::default(), args.selection.resolve_workspace().unwrap());

        assert_eq!(request.workspace, PathBuf::from("/ws"));
        assert_eq!(request.base_dir, PathBuf::from("src"));
        assert_eq!(request.include_glob, "**/*.rs");
        assert_eq!(request.exclude_glob, "target/");
        assert!(!request.default_excludes);
    }

    #[test]
    fn test_base_path_follows_request_resolution() {
        let ws = Path::new("/ws");
        let args = parse(&["tar", "-f", "o.tar"]);
        assert_eq!(args.selection.base_path(ws), PathBuf::from("/ws"));

        let args = parse(&["tar", "-f", "o.tar", "-d", "hello"]);
        let request = build_request(&args, &Config::default(), ws.to_path_buf());
        assert_eq!(args.selection.base_path(ws), request.base_path());
    }

    #[test]
    fn test_relative_workspace_is_made_absolute() {
        let args = parse(&["tar", "-f", "o.tar", "-C", "sub"]);
        let workspace = args.selection.resolve_workspace().unwrap();
        assert!(workspace.is_absolute());
        assert!(workspace.ends_with("sub"));
    }

    #[test]
    fn test_file_is_required_but_may_be_empty() {
        assert!(TarArgs::try_parse_from(["tar"]).is_err());
        let args = parse(&["tar", "--file", ""]);
        let request = build_request(&args, &Config::default(), PathBuf::from("/ws"));
        assert!(request.validate().is_err());
    }
}
