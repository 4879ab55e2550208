//! # File Selection (`commands::tarball::select`)
//!
//! File: cli/src/commands/tarball/select.rs
//!
//! ## Overview
//!
//! Decides which files under a base directory go into an archive. Patterns use
//! Ant syntax:
//!
//! - `*` matches any characters except `/`
//! - `?` matches exactly one character except `/`
//! - `**` matches any number of whole path segments
//! - `/` is the separator on every platform (`\` in a pattern is read as `/`)
//! - a pattern ending in `/` matches everything below it (`build/` is `build/**`)
//! - several patterns can be given in one field, separated by commas
//!
//! A file is selected when it matches an include pattern and matches neither
//! an exclude pattern nor, when enabled, one of `DEFAULT_EXCLUDES`. Results are
//! sorted by relative path so archives are reproducible.
//!
//! ## Architecture
//!
//! - `PathMatcher` compiles the three pattern groups into `globset::GlobSet`s.
//! - `find` walks the tree with `walkdir` (following symlinks), pruning
//!   directories that the default excludes drop entirely.
//! - `select` is `find` restricted to regular files.
//!
use crate::common::fs::paths::to_slash_relative;
use crate::core::error::{Result, TarrsError};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// VCS and OS metadata patterns dropped when default excludes are enabled.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    // Miscellaneous typical temporary files
    "**/*~",
    "**/#*#",
    "**/.#*",
    "**/%*%",
    "**/._*",
    // CVS
    "**/CVS",
    "**/CVS/**",
    "**/.cvsignore",
    // SCCS
    "**/SCCS",
    "**/SCCS/**",
    // Visual SourceSafe
    "**/vssver.scc",
    // Subversion
    "**/.svn",
    "**/.svn/**",
    // Mac
    "**/.DS_Store",
    // Git
    "**/.git",
    "**/.git/**",
    "**/.gitattributes",
    "**/.gitignore",
    "**/.gitmodules",
    // Mercurial
    "**/.hg",
    "**/.hg/**",
    "**/.hgignore",
    "**/.hgsub",
    "**/.hgsubstate",
    "**/.hgtags",
    // Bazaar
    "**/.bzr",
    "**/.bzr/**",
    "**/.bzrignore",
];

/// Directories whose whole subtree `DEFAULT_EXCLUDES` drops; the walk skips them.
const DEFAULT_EXCLUDED_DIRS: &[&str] = &["CVS", "SCCS", ".svn", ".git", ".hg", ".bzr"];

/// One file or directory found under the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    /// Path relative to the base directory, `/`-separated. Used as the tar entry name.
    pub relative_path: String,
    pub absolute_path: PathBuf,
    pub is_directory: bool,
}

/// Compiled include/exclude/default-exclude patterns.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    include: GlobSet,
    exclude: GlobSet,
    default_excludes: Option<GlobSet>,
}

impl PathMatcher {
    /// # Build Matcher (`PathMatcher::new`)
    ///
    /// Compiles the caller's include and exclude fields. An include field with
    /// no patterns selects everything (`**`).
    ///
    /// ## Errors
    ///
    /// Returns a `TarrsError::Validation` naming the offending pattern if a
    /// pattern cannot be compiled.
    pub fn new(include_glob: &str, exclude_glob: &str, default_excludes: bool) -> Result<Self> {
        let mut includes = split_patterns(include_glob);
        if includes.is_empty() {
            includes.push("**".to_string());
        }
        let excludes = split_patterns(exclude_glob);
        let defaults = if default_excludes {
            let patterns: Vec<String> = DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect();
            Some(compile("default excludes", &patterns)?)
        } else {
            None
        };

        Ok(PathMatcher {
            include: compile("glob", &includes)?,
            exclude: compile("exclude", &excludes)?,
            default_excludes: defaults,
        })
    }

    /// True when `relative` (a `/`-separated path) should be selected.
    pub fn is_selected(&self, relative: &str) -> bool {
        self.include.is_match(relative)
            && !self.exclude.is_match(relative)
            && !self.is_default_excluded(relative)
    }

    fn is_default_excluded(&self, relative: &str) -> bool {
        self.default_excludes
            .as_ref()
            .is_some_and(|set| set.is_match(relative))
    }

    fn prunes_dir(&self, name: &str) -> bool {
        self.default_excludes.is_some() && DEFAULT_EXCLUDED_DIRS.contains(&name)
    }
}

/// Splits a comma-separated pattern field into normalized Ant patterns.
fn split_patterns(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            let mut pattern = p.replace('\\', "/");
            if pattern.ends_with('/') {
                pattern.push_str("**");
            }
            pattern
        })
        .collect()
}

/// Ant has no character classes or alternation, so these are literals.
fn escape_glob_literals(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            '[' | ']' | '{' | '}' => {
                escaped.push('[');
                escaped.push(c);
                escaped.push(']');
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

fn compile(field: &str, patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(&escape_glob_literals(pattern))
            .literal_separator(true)
            .backslash_escape(false)
            .build()
            .map_err(|e| {
                TarrsError::Validation(format!("{}: invalid pattern '{}': {}", field, pattern, e))
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| {
        TarrsError::Validation(format!("{}: failed to build pattern set: {}", field, e)).into()
    })
}

/// # Select Files (`select`)
///
/// Returns every regular file under `base_dir` selected by the patterns,
/// sorted by relative path. Directories are walked but never returned.
///
/// ## Errors
///
/// - `TarrsError::NotFound` if `base_dir` does not exist.
/// - `TarrsError::InvalidArgument` if `base_dir` is not a directory.
/// - `TarrsError::Validation` for an invalid pattern.
/// - `TarrsError::Io` if part of the tree cannot be read.
pub fn select(
    base_dir: &Path,
    include_glob: &str,
    exclude_glob: &str,
    default_excludes: bool,
) -> Result<Vec<CandidateEntry>> {
    let matcher = PathMatcher::new(include_glob, exclude_glob, default_excludes)?;
    find(base_dir, &matcher, false)
}

/// # Find Entries (`find`)
///
/// Walks `base_dir` and returns the entries selected by `matcher`, sorted by
/// relative path. Directories are included only when `include_dirs` is set.
///
/// ## Errors
///
/// Same as `select`, minus pattern validation.
pub fn find(base_dir: &Path, matcher: &PathMatcher, include_dirs: bool) -> Result<Vec<CandidateEntry>> {
    check_base_dir(base_dir)?;
    info!("Scanning {}", base_dir.display());

    let mut entries = Vec::new();
    let walker = WalkDir::new(base_dir)
        .follow_links(true)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| {
            !(entry.depth() > 0
                && entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| matcher.prunes_dir(name)))
        });

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) => {
                // Dangling symlinks are skipped; anything else aborts the walk.
                if e.io_error().is_some_and(|io| io.kind() == ErrorKind::NotFound) {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
                let message = format!("Failed to scan {}: {}", base_dir.display(), e);
                let io = std::io::Error::from(e);
                return Err(TarrsError::io(message, io).into());
            }
        };

        let is_directory = entry.file_type().is_dir();
        if !is_directory && !entry.file_type().is_file() {
            debug!("Skipping special file {}", entry.path().display());
            continue;
        }
        if is_directory && !include_dirs {
            continue;
        }
        let Some(relative_path) = to_slash_relative(entry.path(), base_dir) else {
            continue;
        };
        if !matcher.is_selected(&relative_path) {
            debug!("Not selected: {}", relative_path);
            continue;
        }

        debug!("Selected: {}", relative_path);
        entries.push(CandidateEntry {
            relative_path,
            absolute_path: entry.into_path(),
            is_directory,
        });
    }

    entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    info!("Selected {} entries", entries.len());
    Ok(entries)
}

fn check_base_dir(base_dir: &Path) -> Result<()> {
    match std::fs::metadata(base_dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(TarrsError::InvalidArgument {
            path: base_dir.display().to_string(),
        }
        .into()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(TarrsError::NotFound {
            path: base_dir.display().to_string(),
        }
        .into()),
        Err(e) => Err(TarrsError::io(format!("Failed to access {}", base_dir.display()), e).into()),
    }
}
