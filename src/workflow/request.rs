//! Defaulting of pull requests opened from the current branch.

use crate::local::{GitOperationError, VersionControl};

use super::session::SessionContext;

/// Caller-supplied fields for a pull request from the current branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestCreationRequest {
    /// Title; defaults to the last commit's summary line.
    pub title: Option<String>,
    /// Base branch; defaults to the remote's default branch.
    pub base: Option<String>,
    /// Owner; defaults to the session owner.
    pub owner: Option<String>,
    /// Repository; defaults to the session repository.
    pub repository: Option<String>,
}

/// Request with every field decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPullRequest {
    /// Current local branch.
    pub head: String,
    /// Pull request title.
    pub title: String,
    /// Branch to merge into.
    pub base: String,
    /// Owner of the target repository.
    pub owner: String,
    /// Target repository name.
    pub repository: String,
}

impl PullRequestCreationRequest {
    /// Fills absent fields, in order: head from the current branch, title
    /// from the last commit, repository and owner from the session, base from
    /// the default branch. Supplied fields are kept as given and their
    /// fallbacks are never queried.
    ///
    /// # Errors
    ///
    /// Propagates the first failing git query.
    pub fn resolve<V>(
        self,
        git: &V,
        session: &SessionContext,
    ) -> Result<ResolvedPullRequest, GitOperationError>
    where
        V: VersionControl + ?Sized,
    {
        let head = git.current_branch()?;
        let title = self.title.map_or_else(|| git.last_commit_message(), Ok)?;
        let repository = self
            .repository
            .unwrap_or_else(|| session.repository_name().to_owned());
        let owner = self.owner.unwrap_or_else(|| session.owner().to_owned());
        let base = self.base.map_or_else(|| git.default_branch(), Ok)?;

        Ok(ResolvedPullRequest {
            head,
            title,
            base,
            owner,
            repository,
        })
    }
}
