//! Error types for flow-git

/// Result type for flow-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in flow-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `git status` exited non-zero: the path is not a work tree, or git
    /// itself failed before producing output.
    #[error("not a git repository or git command failed")]
    NotARepository,

    /// A git invocation exited non-zero. Carries the raw stderr text.
    #[error("git command failed: {message}")]
    CommandFailed { message: String },

    /// `git commit` exited non-zero.
    #[error("commit failed: {message}")]
    CommitFailed { message: String },

    /// Both push attempts (with and without `--set-upstream`) exited non-zero.
    #[error("push failed: {message}")]
    PushFailed { message: String },

    /// An unstage pattern failed while staging in strict mode.
    #[error("failed to unstage pattern '{pattern}': {message}")]
    UnstageFailed { pattern: String, message: String },

    /// The child process could not be spawned or its output read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
