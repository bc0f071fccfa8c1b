//! Error types for flow-maven

/// Result type for flow-maven operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in flow-maven operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The build tool could not be spawned (missing binary, bad project
    /// directory) or its output could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
