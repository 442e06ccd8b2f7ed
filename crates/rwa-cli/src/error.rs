//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The dataset did not pass validation.
    #[error("validation failed with {0} violation(s)")]
    ValidationFailed(usize),

    /// Unknown segment name.
    #[error("unknown segment: {0}")]
    UnknownSegment(String),
}
