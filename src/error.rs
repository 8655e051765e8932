use std::io;
use thiserror::Error;

use crate::config::settings::ConfigError;

/// Errors that can occur while talking to git
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Git command failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Top-level error for a single guard invocation
///
/// None of these variants ever blocks a commit. The hook maps each of them to
/// either a skip or a fail-open report; see `hook::Hook::run`.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("No commit message available: {0}")]
    MissingInput(String),

    #[error("Could not retrieve staged changes: {0}")]
    ChangeRetrieval(#[source] GitError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),
}

/// Result type for git operations
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Result type for guard-level operations
pub type GuardResult<T> = std::result::Result<T, GuardError>;
