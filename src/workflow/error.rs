//! Errors returned by workflow operations.

use thiserror::Error;

use crate::github::GitHubError;
use crate::local::{GitOperationError, LocalDiscoveryError};

/// Failure of a single pull request operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// The GitHub API call failed.
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    /// A local git step failed.
    #[error(transparent)]
    Git(#[from] GitOperationError),

    /// The working copy could not be inspected.
    #[error(transparent)]
    Discovery(#[from] LocalDiscoveryError),

    /// The head repository of the pull request exposes no clone URL, usually
    /// because the fork was deleted.
    #[error("pull request #{number} has no head repository URL to fetch from")]
    MissingCloneUrl {
        /// Pull request number.
        number: u64,
    },

    /// Configuration was incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the missing or invalid setting.
        message: String,
    },

    /// Writing output failed.
    #[error("I/O error: {message}")]
    Io {
        /// Underlying error text.
        message: String,
    },
}
