use thiserror::Error;

use iso360_core::AnalysisError;
use iso360_lookup::LookupError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Disc or executable could not be decoded
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Title table could not be loaded or refreshed
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// JSON encoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Some of several inputs failed (already reported)
    #[error("{0} of {1} file(s) could not be analyzed")]
    PartialFailure(usize, usize),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
