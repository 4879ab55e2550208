//! # tarrs Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout tarrs. Every failure the
//! archive engine can report to its caller maps to one variant of `TarrsError`,
//! so command handlers and tests can tell a rejected request apart from a
//! filesystem problem without parsing messages.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `TarrsError`: A custom error enum using `thiserror` for the failure categories
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The categories are:
//! - Validation failures (empty destination, malformed glob)
//! - Missing base directory (`NotFound`)
//! - Base path that is not a directory (`InvalidArgument`)
//! - Existing destination without overwrite (`AlreadyExists`)
//! - I/O failures (deletion, streaming, permissions)
//! - Configuration errors
//!
//! ## Examples
//!
//! ```rust
//! // Raise a typed error
//! if request.dest_path.trim().is_empty() {
//!     anyhow::bail!(TarrsError::Validation("Can not be empty".into()));
//! }
//!
//! // Inspect the category of a failure
//! match result {
//!     Err(e) if matches!(e.downcast_ref::<TarrsError>(), Some(TarrsError::AlreadyExists { .. })) => {
//!         eprintln!("Pass --overwrite true to replace it.");
//!     }
//!     other => other?,
//! }
//! ```
//!
//! Messages are written to be shown to the user verbatim.
//!
use thiserror::Error;

/// Custom error type for the tarrs application.
#[derive(Error, Debug)]
pub enum TarrsError {
    /// The request itself is malformed (empty destination, bad pattern).
    #[error("{0}")]
    Validation(String),

    #[error("Directory '{path}' does not exist.")]
    NotFound { path: String },

    #[error("'{path}' is not a directory.")]
    InvalidArgument { path: String },

    /// `path` is kept exactly as the caller spelled it.
    #[error("{path} exists.")]
    AlreadyExists { path: String },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TarrsError {
    /// Wraps an `io::Error` with a user-facing message.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        TarrsError::Io {
            message: message.into(),
            source,
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let exists = TarrsError::AlreadyExists {
            path: "hello.tar.gz".into(),
        };
        assert_eq!(exists.to_string(), "hello.tar.gz exists.");

        let empty = TarrsError::Validation("Can not be empty".into());
        assert_eq!(empty.to_string(), "Can not be empty");

        let missing = TarrsError::NotFound {
            path: "/nowhere".into(),
        };
        assert_eq!(missing.to_string(), "Directory '/nowhere' does not exist.");

        let cfg = TarrsError::Config("bad key".into());
        assert_eq!(cfg.to_string(), "Configuration error: bad key");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = TarrsError::io(
            "Failed to delete out.tgz",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to delete out.tgz");
        let source = std::error::Error::source(&err).expect("source should be set");
        assert_eq!(source.to_string(), "denied");
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = TarrsError::InvalidArgument {
            path: "file.txt".into(),
        }
        .into();
        assert!(matches!(
            err.downcast_ref::<TarrsError>(),
            Some(TarrsError::InvalidArgument { .. })
        ));
    }
}
