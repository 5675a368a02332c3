//! Error types for footprint file output.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for footprint output operations.
pub type KicadResult<T> = Result<T, KicadError>;

/// Errors that can occur while writing footprint libraries.
#[derive(Debug, Error)]
pub enum KicadError {
    /// Failed to create a library directory.
    #[error("Failed to create directory: {path}")]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write the file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl KicadError {
    /// Creates a directory creation error.
    pub fn create_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Returns the path involved in the failed operation.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::CreateDir { path, .. } | Self::FileWrite { path, .. } => path,
        }
    }
}
