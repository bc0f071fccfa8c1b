//! Error types for flow-coverage

use std::path::PathBuf;

/// Result type for flow-coverage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in flow-coverage operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No report file at the expected path.
    #[error("no coverage report found at {path}")]
    ReportNotFound { path: PathBuf },

    /// The file exists but does not look like an XML report.
    #[error("failed to parse coverage report at {path}")]
    InvalidReport { path: PathBuf },

    /// The report file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
