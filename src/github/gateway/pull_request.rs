//! Octocrab implementation of the pull request gateway.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};
use url::Url;

use crate::github::error::GitHubError;
use crate::github::locator::{PersonalAccessToken, PullRequestLocator, RepositoryLocator};
use crate::github::models::{
    ApiAuthenticatedUser, ApiCommentBody, ApiCreatedPullRequest, ApiPullRequestDetail,
    ApiPullRequestSummary, CreatedPullRequest, NewPullRequest, PullRequestDetail,
    PullRequestSummary,
};
use crate::github::rate_limit::RateLimitInfo;

use super::PullRequestGateway;
use super::client::build_octocrab_client;
use super::error_mapping::{is_rate_limit_error, map_octocrab_error, rate_limit_error};

/// Largest page size the pulls endpoint accepts.
const LIST_PAGE_SIZE: &str = "100";

/// Octocrab-backed gateway.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an authenticated gateway for the given API base.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::InvalidUrl`] when the base URI cannot be parsed
    /// or [`GitHubError::Api`] when Octocrab fails to construct a client.
    pub fn for_token(token: &PersonalAccessToken, api_base: &Url) -> Result<Self, GitHubError> {
        let octocrab = build_octocrab_client(token, api_base)?;
        Ok(Self::new(octocrab))
    }

    async fn map_error(&self, operation: &str, error: &octocrab::Error) -> GitHubError {
        match error {
            octocrab::Error::GitHub { source, .. } if is_rate_limit_error(source) => {
                let rate_limit = self.fetch_rate_limit_info().await;
                rate_limit_error(operation, source, rate_limit)
            }
            _ => map_octocrab_error(operation, error),
        }
    }

    async fn fetch_rate_limit_info(&self) -> Option<RateLimitInfo> {
        let rate = self.client.ratelimit().get().await.ok()?.rate;
        let Ok(limit) = u32::try_from(rate.limit) else {
            return None;
        };
        let Ok(remaining) = u32::try_from(rate.remaining) else {
            return None;
        };
        Some(RateLimitInfo::new(limit, remaining, rate.reset))
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn authenticated_user(&self) -> Result<String, GitHubError> {
        tracing::debug!("fetching authenticated user");
        match self
            .client
            .get::<ApiAuthenticatedUser, _, _>("/user", None::<&()>)
            .await
        {
            Ok(user) => Ok(user.login),
            Err(error) => Err(self.map_error("authenticated user", &error).await),
        }
    }

    async fn list_open_pull_requests(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<Vec<PullRequestSummary>, GitHubError> {
        tracing::debug!(repository = %locator.slug(), "listing open pull requests");
        let query = [("state", "open"), ("per_page", LIST_PAGE_SIZE)];

        let first_page: Page<ApiPullRequestSummary> =
            match self.client.get(locator.pulls_path(), Some(&query)).await {
                Ok(page) => page,
                Err(error) => return Err(self.map_error("list pulls", &error).await),
            };

        match self.client.all_pages(first_page).await {
            Ok(pulls) => Ok(pulls.into_iter().map(ApiPullRequestSummary::into).collect()),
            Err(error) => Err(self.map_error("list pulls", &error).await),
        }
    }

    async fn pull_request(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestDetail, GitHubError> {
        tracing::debug!(
            repository = %locator.repository().slug(),
            number = locator.number().get(),
            "fetching pull request"
        );
        match self
            .client
            .get::<ApiPullRequestDetail, _, _>(locator.pull_request_path(), None::<&()>)
            .await
        {
            Ok(pull) => Ok(pull.into()),
            Err(error) => Err(self.map_error("pull request", &error).await),
        }
    }

    async fn create_issue_comment(
        &self,
        locator: &PullRequestLocator,
        body: &str,
    ) -> Result<(), GitHubError> {
        tracing::debug!(
            repository = %locator.repository().slug(),
            number = locator.number().get(),
            "posting issue comment"
        );
        let payload = ApiCommentBody { body };
        let response: Result<serde_json::Value, _> = self
            .client
            .post(locator.comments_path(), Some(&payload))
            .await;
        match response {
            Ok(_comment) => Ok(()),
            Err(error) => Err(self.map_error("create comment", &error).await),
        }
    }

    async fn create_pull_request(
        &self,
        locator: &RepositoryLocator,
        request: &NewPullRequest,
    ) -> Result<CreatedPullRequest, GitHubError> {
        tracing::debug!(
            repository = %locator.slug(),
            head = %request.head,
            base = %request.base,
            "creating pull request"
        );
        let response: Result<ApiCreatedPullRequest, _> =
            self.client.post(locator.pulls_path(), Some(request)).await;
        match response {
            Ok(created) => Ok(created.into()),
            Err(error) => Err(self.map_error("create pull request", &error).await),
        }
    }
}
