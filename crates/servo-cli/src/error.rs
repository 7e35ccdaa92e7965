//! Error types for servo-cli

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for servo-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in servo-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from servo-nomenclature
    #[error(transparent)]
    Nomenclature(#[from] servo_nomenclature::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error on a specific path
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A `--set` argument that is not `key=code`
    #[error("Invalid segment assignment '{0}' (expected key=code, e.g. b=01)")]
    InvalidAssignment(String),

    /// JSON output could not be produced
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Creates an I/O error tagged with the path involved.
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
