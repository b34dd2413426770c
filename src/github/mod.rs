//! GitHub REST access for pull request orchestration.
//!
//! This module wraps Octocrab behind [`PullRequestGateway`] so the workflow
//! can list, inspect, comment on and open pull requests. Octocrab failures
//! are mapped into [`GitHubError`] variants that the CLI reports without
//! exposing transport internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod rate_limit;

pub use error::GitHubError;
pub use gateway::{OctocrabGateway, PullRequestGateway};
pub use locator::{
    DEFAULT_API_BASE, PersonalAccessToken, PullRequestLocator, PullRequestNumber,
    RepositoryLocator, RepositoryName, RepositoryOwner, parse_api_base,
};
pub use models::{CreatedPullRequest, NewPullRequest, PullRequestDetail, PullRequestSummary};
pub use rate_limit::RateLimitInfo;

#[cfg(test)]
pub use gateway::MockPullRequestGateway;
