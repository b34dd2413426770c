//! Error types for local repository discovery and git operations.

use thiserror::Error;

/// Errors raised while locating the GitHub origin of the working copy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocalDiscoveryError {
    /// Current directory is not within a Git repository.
    #[error("not inside a Git repository")]
    NotARepository,

    /// The repository has no remotes configured.
    #[error("repository has no remotes configured")]
    NoRemotes,

    /// The specified remote does not exist.
    #[error("remote '{name}' not found")]
    RemoteNotFound {
        /// Name of the missing remote.
        name: String,
    },

    /// The remote URL does not name an `owner/repo` pair.
    #[error("could not parse remote URL: {url}")]
    InvalidRemoteUrl {
        /// The unparseable URL string.
        url: String,
    },

    /// Git operation failed.
    #[error("git error: {message}")]
    Git {
        /// Error detail from the git2 library.
        message: String,
    },
}

impl From<git2::Error> for LocalDiscoveryError {
    fn from(error: git2::Error) -> Self {
        Self::Git {
            message: error.message().to_owned(),
        }
    }
}

/// Errors raised by fetch, checkout, push and HEAD inspection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GitOperationError {
    /// No repository could be opened from the working directory.
    #[error("repository not available: {message}")]
    RepositoryNotAvailable {
        /// Reason reported by git.
        message: String,
    },

    /// HEAD does not point at a branch.
    #[error("HEAD is detached; check out a branch first")]
    DetachedHead,

    /// The current branch has no commits yet.
    #[error("the current branch has no commits")]
    NoCommits,

    /// A local branch was expected but does not exist.
    #[error("branch '{name}' not found")]
    BranchNotFound {
        /// Branch name.
        name: String,
    },

    /// The remote does not advertise a default branch.
    #[error("could not determine the default branch of origin")]
    DefaultBranchUnknown,

    /// Fetching from a remote failed.
    #[error("fetch failed: {message}")]
    FetchFailed {
        /// Error detail from git.
        message: String,
    },

    /// The remote refused the pushed reference.
    #[error("push of '{branch}' was rejected: {message}")]
    PushRejected {
        /// Branch that was pushed.
        branch: String,
        /// Rejection status returned by the remote.
        message: String,
    },

    /// Updating the working tree failed.
    #[error("checkout failed: {message}")]
    CheckoutFailed {
        /// Error detail from git.
        message: String,
    },

    /// Any other git failure.
    #[error("git error: {message}")]
    Git {
        /// Error detail from the git2 library.
        message: String,
    },
}

impl From<git2::Error> for GitOperationError {
    fn from(error: git2::Error) -> Self {
        Self::Git {
            message: error.message().to_owned(),
        }
    }
}
