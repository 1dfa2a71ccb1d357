//! Domain-specific error types for the rules importer.
//!
//! Internal modules return typed errors where the caller needs to tell them
//! apart (e.g. the fatal [`ImportError::SourceMissing`]); everything else is
//! carried as [`anyhow::Error`] with context and converted at the CLI
//! boundary via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ImportError        fatal, aborts the run with a non-zero exit
//! ├── SourceMissing
//! └── TargetUnavailable
//! ConfigError        settings file problems, reported as warnings
//! PlacementError     per-file problems, reported and the run continues
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for an import run.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The source rules directory does not exist or is not a directory.
    #[error("Rules directory not found at {}", path.display())]
    SourceMissing {
        /// Path that was expected to hold the rule sets.
        path: PathBuf,
    },

    /// The target directory (or its `.cursor` directory) cannot be created.
    #[error("cannot prepare target {}: {source}", path.display())]
    TargetUnavailable {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise while loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file exists but cannot be read.
    #[error("IO error reading settings file {}: {source}", path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has unexpected keys.
    #[error("Invalid settings in {}: {message}", path.display())]
    InvalidSyntax {
        /// Path to the malformed file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// Errors that arise while placing a single file or link.
#[derive(Error, Debug)]
pub enum PlacementError {
    /// A parent directory for the destination could not be created.
    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Removing an existing destination entry failed.
    #[error("cannot remove existing {}: {source}", path.display())]
    RemoveExisting {
        /// Destination that could not be removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Copying (including a fallback copy) failed.
    #[error("cannot copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        /// Source file.
        from: PathBuf,
        /// Destination file.
        to: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Creating a directory link failed.
    #[error("cannot link {} -> {}: {source}", link.display(), target.display())]
    Link {
        /// Path of the link that could not be created.
        link: PathBuf,
        /// Path the link should have pointed at.
        target: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn source_missing_display() {
        let e = ImportError::SourceMissing {
            path: PathBuf::from("/opt/rules"),
        };
        assert_eq!(e.to_string(), "Rules directory not found at /opt/rules");
    }

    #[test]
    fn target_unavailable_has_source() {
        use std::error::Error as StdError;
        let e = ImportError::TargetUnavailable {
            path: PathBuf::from("/readonly/project"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("/readonly/project"));
        assert!(e.source().is_some());
    }

    #[test]
    fn config_error_invalid_syntax_display() {
        let e = ConfigError::InvalidSyntax {
            path: PathBuf::from("config.toml"),
            message: "unexpected token".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid settings in config.toml: unexpected token"
        );
    }

    #[test]
    fn config_error_io_display() {
        let e = ConfigError::Io {
            path: PathBuf::from("/etc/config.toml"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("/etc/config.toml"));
        assert!(e.to_string().contains("IO error reading settings file"));
    }

    #[test]
    fn placement_copy_display() {
        let e = PlacementError::Copy {
            from: PathBuf::from("rules/general/a.md"),
            to: PathBuf::from(".cursor/rules/general/a.md"),
            source: io::Error::other("disk full"),
        };
        let msg = e.to_string();
        assert!(msg.contains("rules/general/a.md"));
        assert!(msg.contains("disk full"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ImportError>();
        assert_send_sync::<ConfigError>();
        assert_send_sync::<PlacementError>();
    }

    #[test]
    fn source_missing_converts_to_anyhow_and_back() {
        let e: anyhow::Error = ImportError::SourceMissing {
            path: PathBuf::from("/nope"),
        }
        .into();
        assert!(matches!(
            e.downcast_ref::<ImportError>(),
            Some(ImportError::SourceMissing { .. })
        ));
    }
}
