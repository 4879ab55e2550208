//! # tarrs Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the defaults that fill in any request flag the user did
//! not pass on the command line: whether to gzip, whether to overwrite an
//! existing archive, whether the built-in VCS excludes apply, whether the
//! result is registered as an artifact, and where artifacts are copied.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags and environment variables (applied by the command handler)
//! 2. Project-specific `.tarrs.toml` in the workspace (`-C`) or its ancestors
//! 3. User-specific `<config dir>/tarrs/config.toml`
//! 4. Default values defined in the code
//!
//! Every value in the TOML model is optional so that "not set" can be told
//! apart from "set to the default" while merging.
//!
//! ## Examples
//!
//! ```toml
//! # .tarrs.toml
//! [tar]
//! compress = false
//! overwrite = true
//!
//! [artifacts]
//! directory = "~/builds/artifacts"
//! ```
//!
//! ```rust
//! let cfg = config::load_config(&workspace)?;
//! let compress = args.compress.unwrap_or(cfg.compress());
//! ```
//!
use crate::core::error::{Result, TarrsError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub tar: TarDefaults,
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
}

/// Defaults for the `tarrs tar` / `tarrs list` request flags.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TarDefaults {
    /// Gzip the tar stream.
    pub compress: Option<bool>,
    /// Replace an existing destination file.
    pub overwrite: Option<bool>,
    /// Apply the built-in VCS/metadata exclude table.
    pub default_excludes: Option<bool>,
    /// Register the finished archive as an artifact.
    pub archive: Option<bool>,
}

/// Where registered archives are copied.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ArtifactsConfig {
    /// Artifacts directory (can use ~). Relative paths are resolved against the workspace.
    pub directory: Option<String>,
}

const DEFAULT_COMPRESS: bool = true;
const DEFAULT_OVERWRITE: bool = false;
const DEFAULT_DEFAULT_EXCLUDES: bool = true;
const DEFAULT_ARCHIVE: bool = false;
const DEFAULT_ARTIFACTS_DIR: &str = ".tarrs/artifacts";

const PROJECT_CONFIG_FILENAME: &str = ".tarrs.toml";

impl Config {
    pub fn compress(&self) -> bool {
        self.tar.compress.unwrap_or(DEFAULT_COMPRESS)
    }

    pub fn overwrite(&self) -> bool {
        self.tar.overwrite.unwrap_or(DEFAULT_OVERWRITE)
    }

    pub fn default_excludes(&self) -> bool {
        self.tar.default_excludes.unwrap_or(DEFAULT_DEFAULT_EXCLUDES)
    }

    pub fn archive(&self) -> bool {
        self.tar.archive.unwrap_or(DEFAULT_ARCHIVE)
    }

    pub fn artifacts_dir(&self) -> String {
        self.artifacts
            .directory
            .clone()
            .unwrap_or_else(|| DEFAULT_ARTIFACTS_DIR.to_string())
    }
}

/// # Load Configuration (`load_config`)
///
/// Loads the user and project configuration files (either may be absent),
/// merges them with project values taking precedence, expands `~` in paths and
/// validates the result. The project file is searched for starting at
/// `workspace`, the directory the command runs against.
///
/// ## Errors
///
/// Returns an `Err` if a configuration file exists but cannot be read or
/// parsed (including unknown keys), or if validation fails.
pub fn load_config(workspace: &Path) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = match find_project_config_path(workspace) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            Some(load_config_from_path(&path)?)
        }
        None => {
            debug!(
                "No project configuration file (.tarrs.toml) found in {} or its ancestors.",
                workspace.display()
            );
            None
        }
    };
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "tarrs", "tarrs") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for `.tarrs.toml`.
/// The search stops at the first directory containing `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    Config {
        tar: TarDefaults {
            compress: project_cfg.tar.compress.or(user.tar.compress),
            overwrite: project_cfg.tar.overwrite.or(user.tar.overwrite),
            default_excludes: project_cfg
                .tar
                .default_excludes
                .or(user.tar.default_excludes),
            archive: project_cfg.tar.archive.or(user.tar.archive),
        },
        artifacts: ArtifactsConfig {
            directory: project_cfg.artifacts.directory.or(user.artifacts.directory),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    if let Some(dir) = config.artifacts.directory.as_mut() {
        *dir = shellexpand::tilde(dir).into_owned();
        debug!("Expanded artifacts directory: {}", dir);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(dir) = &config.artifacts.directory {
        if dir.trim().is_empty() {
            return Err(anyhow!(TarrsError::Config(
                "artifacts.directory cannot be empty.".to_string()
            )));
        }
        let path = Path::new(dir);
        if path.is_absolute() && path.exists() && !path.is_dir() {
            return Err(anyhow!(TarrsError::Config(format!(
                "Configured artifacts path '{}' exists but is not a directory.",
                path.display()
            ))));
        }
    }
    Ok(())
}
