//! Error taxonomy for repository operations
//!
//! Every operation resolves paths and references itself and reports failures
//! through one of these kinds instead of passing raw engine errors through.

use git2::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    /// A path, branch, or commit reference does not resolve
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed argument (bad mode, empty message, unknown style, ...)
    #[error("Invalid argument: {0}")]
    Validation(String),

    /// Target already exists or the working tree would be clobbered
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Read operation needs history the repository does not have yet
    #[error("Repository not initialized: {0}")]
    RepositoryNotInitialized(String),

    /// Another process holds an index or ref lock
    #[error("Repository locked: {0}")]
    Locked(String),

    #[error("Git operation failed: {0}")]
    Engine(git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RepoError {
    pub(crate) fn not_found(what: impl Into<String>) -> Self {
        RepoError::NotFound(what.into())
    }

    pub(crate) fn validation(what: impl Into<String>) -> Self {
        RepoError::Validation(what.into())
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            RepoError::NotFound(_) => "not_found",
            RepoError::Validation(_) => "validation",
            RepoError::Conflict(_) => "conflict",
            RepoError::RepositoryNotInitialized(_) => "repository_not_initialized",
            RepoError::Locked(_) => "locked",
            RepoError::Engine(_) => "engine",
            RepoError::Io(_) => "io",
            RepoError::Serialization(_) => "serialization",
        }
    }
}

impl From<git2::Error> for RepoError {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            ErrorCode::Locked => RepoError::Locked(err.message().to_string()),
            _ => RepoError::Engine(err),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
