use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for git-bump operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Working tree has uncommitted changes")]
    DirtyWorkingTree,

    #[error("Branch has local commits not pushed to the remote")]
    UnpushedCommits,

    #[error("No valid prior version: {0}")]
    MissingOrInvalidPriorVersion(String),

    #[error("HEAD is already tagged with the latest version '{0}'")]
    AlreadyTagged(String),

    #[error("Version in {} does not match: expected {expected}, found {found}", path.display())]
    SourceVersionMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("Remote synchronization failed: {0}")]
    RemoteSyncFailure(String),

    #[error("Tag publish failed: {0}")]
    TagPushFailure(String),

    #[error("Invalid input: {0}")]
    InvalidCliInput(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-bump
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    /// Create a prior-version error with context
    pub fn prior_version(msg: impl Into<String>) -> Self {
        BumpError::MissingOrInvalidPriorVersion(msg.into())
    }

    /// Create a remote synchronization error with context
    pub fn sync(msg: impl Into<String>) -> Self {
        BumpError::RemoteSyncFailure(msg.into())
    }

    /// Create a tag creation/push error with context
    pub fn tag_push(msg: impl Into<String>) -> Self {
        BumpError::TagPushFailure(msg.into())
    }

    /// Create an invalid input error with context
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        BumpError::InvalidCliInput(msg.into())
    }

    /// Process exit code for this error: 2 for invalid user input, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        match self {
            BumpError::InvalidCliInput(_) => 2,
            _ => 1,
        }
    }
}
