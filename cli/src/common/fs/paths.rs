//! # tarrs Path Utilities (`common::fs::paths`)
//!
//! File: cli/src/common/fs/paths.rs
//!
//! ## Overview
//!
//! Path spelling helpers used to decide whether two differently written paths
//! name the same file:
//!
//! - `normalize_lexically`: folds `.`/`..` and redundant separators without
//!   touching the filesystem.
//! - `canonicalize_lenient`: `fs::canonicalize` that also works for paths that
//!   do not exist yet, by canonicalizing the deepest existing ancestor.
//! - `to_slash_relative`: the `/`-separated path of a file relative to a base,
//!   used for glob matching and tar entry names.
//!
use crate::core::error::{Result, TarrsError};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Resolves `.` and `..` components lexically.
///
/// `..` at the root stays at the root. Symlinks are not consulted, so this is
/// only a fallback for paths that cannot be canonicalized.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Keep leading `..` for relative paths that climb above their start.
                let climbing = matches!(
                    normalized.components().next_back(),
                    Some(Component::ParentDir)
                );
                if climbing || (!normalized.pop() && !path.has_root()) {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Canonicalizes `path`, tolerating missing trailing components.
///
/// When `path` exists this is `fs::canonicalize`. Otherwise the path is
/// normalized lexically, its deepest existing ancestor is canonicalized, and
/// the remaining components are appended unchanged.
///
/// # Errors
///
/// Returns a `TarrsError::Io` if canonicalization fails for a reason other
/// than the path not existing (e.g., permission denied, symlink loop).
pub fn canonicalize_lenient(path: &Path) -> Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(canonical) => return Ok(canonical),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(
                TarrsError::io(format!("Failed to resolve {}", path.display()), e).into(),
            )
        }
    }

    let normalized = normalize_lexically(path);
    let mut existing = normalized.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            // Nothing along the path exists; the lexical form is the best we have.
            _ => return Ok(normalized),
        }
    }

    let mut resolved = std::fs::canonicalize(existing).map_err(|e| {
        TarrsError::io(format!("Failed to resolve {}", existing.display()), e)
    })?;
    for name in missing.into_iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

/// Returns `path` relative to `base` using `/` separators, or `None` if
/// `path` is not under `base`.
pub fn to_slash_relative(path: &Path, base: &Path) -> Option<String> {
    let relative = pathdiff::diff_paths(path, base)?;
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(parts.join("/"))
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/ws/src/../src/./output.tgz")),
            PathBuf::from("/ws/src/output.tgz")
        );
        assert_eq!(
            normalize_lexically(Path::new("/ws//a///b")),
            PathBuf::from("/ws/a/b")
        );
        assert_eq!(normalize_lexically(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(
            normalize_lexically(Path::new("../x/./y")),
            PathBuf::from("../x/y")
        );
        assert_eq!(
            normalize_lexically(Path::new("../../x")),
            PathBuf::from("../../x")
        );
    }

    #[test]
    fn test_canonicalize_lenient_existing_and_missing_agree() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("src"))?;

        let existing = canonicalize_lenient(&dir.path().join("src"))?;
        let missing = canonicalize_lenient(&dir.path().join("src/../src/output.tgz"))?;
        assert_eq!(missing, existing.join("output.tgz"));
        Ok(())
    }

    #[test]
    fn test_canonicalize_lenient_missing_parents() -> Result<()> {
        let dir = tempdir()?;
        let root = fs::canonicalize(dir.path())?;
        let resolved = canonicalize_lenient(&dir.path().join("a/b/../c/out.tar"))?;
        assert_eq!(resolved, root.join("a/c/out.tar"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_canonicalize_lenient_follows_symlinked_parent() -> Result<()> {
        let dir = tempdir()?;
        let real = dir.path().join("real");
        fs::create_dir(&real)?;
        std::os::unix::fs::symlink(&real, dir.path().join("alias"))?;

        let via_alias = canonicalize_lenient(&dir.path().join("alias/out.tgz"))?;
        assert_eq!(via_alias, fs::canonicalize(&real)?.join("out.tgz"));
        Ok(())
    }

    #[test]
    fn test_to_slash_relative() {
        let base = Path::new("/ws/base");
        assert_eq!(
            to_slash_relative(Path::new("/ws/base/hello/hello.txt"), base).as_deref(),
            Some("hello/hello.txt")
        );
        assert_eq!(
            to_slash_relative(Path::new("/ws/other.txt"), base),
            None
        );
    }
}
