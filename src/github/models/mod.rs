//! Data models for pull requests exchanged with the GitHub API.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into the public domain types.

use serde::{Deserialize, Serialize};

/// Lightweight pull request summary for listing views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestSummary {
    /// Pull request number.
    pub number: u64,
    /// Title of the pull request.
    pub title: Option<String>,
    /// State (e.g. open, closed).
    pub state: Option<String>,
    /// Author login if present.
    pub author: Option<String>,
    /// Creation timestamp (ISO 8601 format).
    pub created_at: Option<String>,
    /// Last update timestamp (ISO 8601 format).
    pub updated_at: Option<String>,
}

/// Pull request fields needed to check out its branch locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestDetail {
    /// Pull request number.
    pub number: u64,
    /// Title of the pull request.
    pub title: Option<String>,
    /// Branch name on the head repository.
    pub head_ref: String,
    /// SSH URL of the head repository, absent when the fork was deleted.
    pub head_ssh_url: Option<String>,
    /// HTTPS clone URL of the head repository.
    pub head_clone_url: Option<String>,
    /// HTML URL for displaying to a user.
    pub html_url: Option<String>,
}

impl PullRequestDetail {
    /// Picks the URL to fetch the head branch from.
    ///
    /// With `prefer_ssh` the SSH URL wins when present; otherwise the HTTPS
    /// clone URL wins. Either falls back to the other kind, and `None` means
    /// the head repository exposes no URL at all.
    #[must_use]
    pub fn remote_url(&self, prefer_ssh: bool) -> Option<&str> {
        let (preferred, fallback) = if prefer_ssh {
            (&self.head_ssh_url, &self.head_clone_url)
        } else {
            (&self.head_clone_url, &self.head_ssh_url)
        };
        non_blank(preferred.as_deref()).or_else(|| non_blank(fallback.as_deref()))
    }
}

fn non_blank(url: Option<&str>) -> Option<&str> {
    url.filter(|value| !value.trim().is_empty())
}

/// Pull request submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    /// Head reference in `<user>:<branch>` form.
    pub head: String,
    /// Branch the changes merge into.
    pub base: String,
    /// Pull request title.
    pub title: String,
}

impl NewPullRequest {
    /// Builds a submission whose head is `<username>:<branch>`.
    #[must_use]
    pub fn new(username: &str, branch: &str, base: &str, title: &str) -> Self {
        Self {
            head: format!("{username}:{branch}"),
            base: base.to_owned(),
            title: title.to_owned(),
        }
    }
}

/// Pull request returned after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPullRequest {
    /// Number assigned by GitHub.
    pub number: u64,
    /// Web page of the new pull request.
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiAuthenticatedUser {
    pub(crate) login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequestSummary {
    pub(crate) number: u64,
    pub(crate) title: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) user: Option<ApiUser>,
    pub(crate) created_at: Option<String>,
    pub(crate) updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequestDetail {
    pub(crate) number: u64,
    pub(crate) title: Option<String>,
    pub(crate) html_url: Option<String>,
    pub(crate) head: ApiHead,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiHead {
    #[serde(rename = "ref")]
    pub(crate) ref_name: String,
    pub(crate) repo: Option<ApiHeadRepository>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiHeadRepository {
    pub(crate) ssh_url: Option<String>,
    pub(crate) clone_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCreatedPullRequest {
    pub(crate) number: u64,
    pub(crate) html_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ApiCommentBody<'body> {
    pub(crate) body: &'body str,
}

impl From<ApiPullRequestSummary> for PullRequestSummary {
    fn from(value: ApiPullRequestSummary) -> Self {
        Self {
            number: value.number,
            title: value.title,
            state: value.state,
            author: value.user.and_then(|user| user.login),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<ApiPullRequestDetail> for PullRequestDetail {
    fn from(value: ApiPullRequestDetail) -> Self {
        let (head_ssh_url, head_clone_url) = value
            .head
            .repo
            .map_or((None, None), |repo| (repo.ssh_url, repo.clone_url));
        Self {
            number: value.number,
            title: value.title,
            head_ref: value.head.ref_name,
            head_ssh_url,
            head_clone_url,
            html_url: value.html_url,
        }
    }
}

impl From<ApiCreatedPullRequest> for CreatedPullRequest {
    fn from(value: ApiCreatedPullRequest) -> Self {
        Self {
            number: value.number,
            html_url: value.html_url,
        }
    }
}
