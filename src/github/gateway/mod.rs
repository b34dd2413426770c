//! Gateway for the GitHub REST calls the orchestrator needs.
//!
//! The trait keeps the workflow testable with mocks while
//! [`OctocrabGateway`] performs real HTTP requests.

mod client;
mod error_mapping;
mod pull_request;

pub use pull_request::OctocrabGateway;

use async_trait::async_trait;

use crate::github::error::GitHubError;
use crate::github::locator::{PullRequestLocator, RepositoryLocator};
use crate::github::models::{
    CreatedPullRequest, NewPullRequest, PullRequestDetail, PullRequestSummary,
};

/// Hosting-API capability used by the pull request workflow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Login of the user owning the token.
    async fn authenticated_user(&self) -> Result<String, GitHubError>;

    /// Every open pull request in the repository, across all pages.
    async fn list_open_pull_requests(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<Vec<PullRequestSummary>, GitHubError>;

    /// Head branch and head repository URLs for one pull request.
    async fn pull_request(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestDetail, GitHubError>;

    /// Posts an issue comment on the pull request.
    async fn create_issue_comment(
        &self,
        locator: &PullRequestLocator,
        body: &str,
    ) -> Result<(), GitHubError>;

    /// Opens a new pull request.
    async fn create_pull_request(
        &self,
        locator: &RepositoryLocator,
        request: &NewPullRequest,
    ) -> Result<CreatedPullRequest, GitHubError>;
}
