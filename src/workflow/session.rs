//! Per-invocation settings shared by every workflow operation.

use crate::config::PullwrightConfig;
use crate::github::{GitHubError, PullRequestGateway, RepositoryLocator};

use super::error::WorkflowError;

/// Prefix used for review branches when none is configured.
pub const DEFAULT_BRANCH_PREFIX: &str = "pr-";

/// Comment posted when starting a review without a configured signature.
pub const DEFAULT_REVIEW_COMMENT: &str = "Just starting reviewing :)";

/// Read-only session state: who is acting, on which repository, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    username: String,
    repository: RepositoryLocator,
    branch_prefix: String,
    review_signature: Option<String>,
    prefer_ssh: bool,
}

impl SessionContext {
    /// Creates a session for `username` acting on `repository` with default
    /// prefix, no signature and HTTPS remotes.
    #[must_use]
    pub fn new(username: impl Into<String>, repository: RepositoryLocator) -> Self {
        Self {
            username: username.into(),
            repository,
            branch_prefix: DEFAULT_BRANCH_PREFIX.to_owned(),
            review_signature: None,
            prefer_ssh: false,
        }
    }

    /// Sets the prefix for review branches.
    #[must_use]
    pub fn with_branch_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.branch_prefix = prefix.into();
        self
    }

    /// Sets the review-start comment body. Blank signatures are ignored.
    #[must_use]
    pub fn with_review_signature(mut self, signature: Option<String>) -> Self {
        self.review_signature = signature.filter(|value| !value.trim().is_empty());
        self
    }

    /// Chooses SSH remote URLs over HTTPS when fetching.
    #[must_use]
    pub const fn with_prefer_ssh(mut self, prefer_ssh: bool) -> Self {
        self.prefer_ssh = prefer_ssh;
        self
    }

    /// Builds the session from configuration.
    ///
    /// The username comes from configuration or, failing that, from the
    /// account owning the token.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure when the username has to be looked up.
    pub async fn from_config<G>(
        config: &PullwrightConfig,
        repository: RepositoryLocator,
        gateway: &G,
    ) -> Result<Self, WorkflowError>
    where
        G: PullRequestGateway + ?Sized,
    {
        let username = match config.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => gateway.authenticated_user().await?,
        };
        tracing::debug!(%username, repository = %repository.slug(), "session resolved");

        Ok(Self::new(username, repository)
            .with_branch_prefix(config.branch_prefix.clone())
            .with_review_signature(config.review_signature.clone())
            .with_prefer_ssh(config.ssh))
    }

    /// Login used in `<username>:<branch>` heads.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Default repository.
    #[must_use]
    pub const fn locator(&self) -> &RepositoryLocator {
        &self.repository
    }

    /// Default owner.
    #[must_use]
    pub const fn owner(&self) -> &str {
        self.repository.owner().as_str()
    }

    /// Default repository name.
    #[must_use]
    pub const fn repository_name(&self) -> &str {
        self.repository.repository().as_str()
    }

    /// Whether SSH remote URLs are preferred.
    #[must_use]
    pub const fn prefers_ssh(&self) -> bool {
        self.prefer_ssh
    }

    /// Body of the review-start comment.
    #[must_use]
    pub fn review_comment(&self) -> &str {
        self.review_signature
            .as_deref()
            .unwrap_or(DEFAULT_REVIEW_COMMENT)
    }

    /// Local branch that receives pull request `number`.
    #[must_use]
    pub fn review_branch_name(&self, number: u64) -> String {
        format!("{}{number}", self.branch_prefix)
    }

    /// Locator for `owner/repository` on the session's host.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::MissingPathSegments`] when either part is empty.
    pub fn locator_for(
        &self,
        owner: &str,
        repository: &str,
    ) -> Result<RepositoryLocator, GitHubError> {
        self.repository.sibling(owner, repository)
    }
}
