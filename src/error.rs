use thiserror::Error;

/// Unified error type for git-guard operations.
///
/// These are operational failures (broken repository, unreadable config,
/// a formatter that cannot be spawned) as opposed to policy violations,
/// which are modeled separately in [crate::gate::Violation].
#[derive(Error, Debug)]
pub enum GitGuardError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Commit message error: {0}")]
    Message(String),

    #[error("Ref update error: {0}")]
    RefUpdate(String),

    #[error("Formatter error: {0}")]
    Formatter(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-guard
pub type Result<T> = std::result::Result<T, GitGuardError>;

impl GitGuardError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitGuardError::Config(msg.into())
    }

    /// Create a commit message error with context
    pub fn message(msg: impl Into<String>) -> Self {
        GitGuardError::Message(msg.into())
    }

    /// Create a ref update error with context
    pub fn ref_update(msg: impl Into<String>) -> Self {
        GitGuardError::RefUpdate(msg.into())
    }

    /// Create a formatter error with context
    pub fn formatter(msg: impl Into<String>) -> Self {
        GitGuardError::Formatter(msg.into())
    }
}
