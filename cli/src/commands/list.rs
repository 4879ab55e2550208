//! # tarrs List Command (`commands::list`)
//!
//! File: cli/src/commands/list.rs
//!
//! ## Overview
//!
//! `tarrs list` runs only the file selection step of `tarrs tar` and prints
//! one relative path per line, in archive order. It accepts the same
//! `--dir`, `--glob`, `--exclude` and `--default-excludes` arguments, so it
//! doubles as a dry run.
//!
//! ```bash
//! tarrs list --dir src --glob '**/*.rs'
//! tarrs list --include-dirs --default-excludes false
//! ```
//!
use crate::commands::tarball::select::{self, PathMatcher};
use crate::commands::tarball::SelectionArgs;
use crate::core::{config, error::Result};
use clap::Parser;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// # List Command Arguments (`ListArgs`)
#[derive(Parser, Debug)]
#[command(about = "List the files a tar command would archive")]
pub struct ListArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Also list matching directories (suffixed with `/`).
    #[arg(long)]
    pub include_dirs: bool,
}

/// # Handle List Command (`handle_list`)
///
/// Resolves the base directory like `tarrs tar` does and prints the selection.
///
/// ## Errors
///
/// Returns the selection errors of `select::find` (missing base directory,
/// base that is not a directory, invalid pattern, unreadable tree).
pub async fn handle_list(args: ListArgs) -> Result<()> {
    info!("Handling list command with args: {:?}", args);

    let workspace = args.selection.resolve_workspace()?;
    let cfg = config::load_config(&workspace)?;
    let base = args.selection.base_path(&workspace);
    let default_excludes = args
        .selection
        .default_excludes
        .unwrap_or(cfg.default_excludes());

    let matcher = PathMatcher::new(&args.selection.glob, &args.selection.exclude, default_excludes)?;
    let mut stdout = std::io::stdout().lock();
    let count = write_listing(&base, &matcher, args.include_dirs, &mut stdout)?;
    info!("Listed {} entries", count);
    Ok(())
}

/// Writes the selected entries of `base` to `out`, returning how many were written.
fn write_listing(
    base: &Path,
    matcher: &PathMatcher,
    include_dirs: bool,
    out: &mut dyn Write,
) -> Result<usize> {
    let entries = select::find(base, matcher, include_dirs)?;
    for entry in &entries {
        if entry.is_directory {
            writeln!(out, "{}/", entry.relative_path)?;
        } else {
            writeln!(out, "{}", entry.relative_path)?;
        }
    }
    Ok(entries.len())
}
