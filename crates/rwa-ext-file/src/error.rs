//! Error types for file import and export.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading or writing files.
#[derive(Error, Debug)]
pub enum FileError {
    /// The file could not be opened or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file has no header row.
    #[error("missing header row")]
    MissingHeader,

    /// Writing to the output failed.
    #[error("write error: {0}")]
    Write(#[from] std::io::Error),
}

impl FileError {
    /// Creates an I/O error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
