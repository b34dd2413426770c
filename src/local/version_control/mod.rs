//! Version-control operations used by the pull request workflow.

mod git2_impl;

pub use git2_impl::Git2VersionControl;

use super::error::GitOperationError;

/// Local repository capability: branch transfer and HEAD inspection.
///
/// Calls are synchronous; the workflow runs them inline between API calls.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl: Send + Sync {
    /// Fetches `remote_branch` from `remote_url` into local branch
    /// `local_branch`.
    ///
    /// # Errors
    ///
    /// Returns [`GitOperationError::FetchFailed`] when the remote does not
    /// advertise `remote_branch` or the transfer fails. Fetching into the
    /// checked-out branch is refused with the same error.
    fn fetch(
        &self,
        remote_url: &str,
        remote_branch: &str,
        local_branch: &str,
    ) -> Result<(), GitOperationError>;

    /// Switches the working tree and HEAD to `branch`.
    ///
    /// # Errors
    ///
    /// Returns [`GitOperationError::BranchNotFound`] for unknown branches and
    /// [`GitOperationError::CheckoutFailed`] when local changes conflict.
    fn checkout(&self, branch: &str) -> Result<(), GitOperationError>;

    /// Pushes `branch` to the branch of the same name on `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`GitOperationError::PushRejected`] when the remote refuses
    /// the update.
    fn push(&self, branch: &str) -> Result<(), GitOperationError>;

    /// Short name of the checked-out branch.
    ///
    /// # Errors
    ///
    /// Returns [`GitOperationError::DetachedHead`] or
    /// [`GitOperationError::NoCommits`] when HEAD names no usable branch.
    fn current_branch(&self) -> Result<String, GitOperationError>;

    /// Summary line of the commit at HEAD.
    ///
    /// # Errors
    ///
    /// Returns [`GitOperationError::NoCommits`] on an unborn branch.
    fn last_commit_message(&self) -> Result<String, GitOperationError>;

    /// Default branch of `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`GitOperationError::DefaultBranchUnknown`] when neither
    /// `origin/HEAD` nor the remote itself names one.
    fn default_branch(&self) -> Result<String, GitOperationError>;
}

#[cfg(test)]
mod tests;
