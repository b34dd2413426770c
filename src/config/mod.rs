//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! From lowest to highest:
//!
//! 1. **Defaults** – built-in values such as the `pr-` branch prefix
//! 2. **Configuration file** – `.pullwright.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `PULLWRIGHT_*`, plus `GITHUB_TOKEN` as a
//!    token fallback
//! 4. **Command-line arguments**
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! username = "alice"
//! owner = "acme"
//! repo = "widgets"
//! branch_prefix = "review/"
//! review_signature = "Looking at this now"
//! ssh = true
//! api_url = "https://ghe.example.com/api/v3"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::github::{
    DEFAULT_API_BASE, GitHubError, PersonalAccessToken, RepositoryLocator, parse_api_base,
};
use crate::local::{LocalDiscoveryError, LocalRepository};
use crate::workflow::{DEFAULT_BRANCH_PREFIX, PullRequestCreationRequest, WorkflowError};

/// Operation selected by the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// List open pull requests.
    ListOpen,
    /// Fetch a pull request branch for review.
    FetchForReview(u64),
    /// Post the review-start comment.
    Comment(u64),
    /// Open a pull request from explicit head, base and title.
    OpenDirect,
    /// Open a pull request from the current branch.
    CreateFromCurrentBranch,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use pullwright::PullwrightConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = PullwrightConfig::load().expect("failed to load configuration");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PULLWRIGHT",
    discovery(
        dotfile_name = ".pullwright.toml",
        config_file_name = "pullwright.toml",
        app_name = "pullwright"
    )
)]
pub struct PullwrightConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `PULLWRIGHT_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// GitHub login used in `<username>:<branch>` heads.
    ///
    /// Looked up from the token's account when unset.
    #[ortho_config(cli_short = 'u')]
    pub username: Option<String>,

    /// Repository owner. Falls back to the `origin` remote.
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name. Falls back to the `origin` remote.
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Prefix of local review branches; `pr-` gives `pr-42`.
    #[ortho_config(cli_short = 'p')]
    pub branch_prefix: String,

    /// Body of the review-start comment.
    #[ortho_config(cli_short = 'S')]
    pub review_signature: Option<String>,

    /// Fetches over SSH instead of HTTPS when the head repository offers it.
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so use the CLI flag or the config file.
    #[ortho_config(cli_short = 's')]
    pub ssh: bool,

    /// GitHub API base, e.g. `https://ghe.example.com/api/v3`.
    ///
    /// Derived from the `origin` host when unset.
    #[ortho_config(cli_short = 'a')]
    pub api_url: Option<String>,

    /// Fetches pull request `N` into a review branch and checks it out.
    #[ortho_config(cli_short = 'f')]
    pub fetch: Option<u64>,

    /// Posts the review-start comment on pull request `N`.
    #[ortho_config(cli_short = 'c')]
    pub comment: Option<u64>,

    /// Opens a pull request from the current branch.
    #[ortho_config(cli_short = 'C')]
    pub create: bool,

    /// Head branch of a pull request opened directly; requires `--title`
    /// and `--base`.
    #[ortho_config(cli_short = 'H')]
    pub head: Option<String>,

    /// Base branch for either way of opening a pull request.
    #[ortho_config(cli_short = 'b')]
    pub base: Option<String>,

    /// Title for either way of opening a pull request.
    #[ortho_config(cli_short = 'T')]
    pub title: Option<String>,

    /// Lists pull requests without drawing the table.
    #[ortho_config(cli_short = 'n')]
    pub no_table: bool,
}

impl Default for PullwrightConfig {
    fn default() -> Self {
        Self {
            token: None,
            username: None,
            owner: None,
            repo: None,
            branch_prefix: DEFAULT_BRANCH_PREFIX.to_owned(),
            review_signature: None,
            ssh: false,
            api_url: None,
            fetch: None,
            comment: None,
            create: false,
            head: None,
            base: None,
            title: None,
            no_table: false,
        }
    }
}

impl PullwrightConfig {
    /// Resolves the token from configuration or `GITHUB_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::MissingToken`] when no source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, GitHubError> {
        let value = self
            .token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(GitHubError::MissingToken)?;
        PersonalAccessToken::new(value)
    }

    /// Picks the operation. Checked in order: `fetch`, `comment`, `head`,
    /// `create`; listing otherwise.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        match (self.fetch, self.comment) {
            (Some(number), _) => OperationMode::FetchForReview(number),
            (None, Some(number)) => OperationMode::Comment(number),
            (None, None) if self.head.is_some() => OperationMode::OpenDirect,
            (None, None) if self.create => OperationMode::CreateFromCurrentBranch,
            (None, None) => OperationMode::ListOpen,
        }
    }

    /// Returns `(title, head, base)` for a direct pull request.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Configuration`] naming the first missing
    /// flag.
    pub fn require_direct_fields(&self) -> Result<(&str, &str, &str), WorkflowError> {
        let head = required(self.head.as_deref(), "--head")?;
        let title = required(self.title.as_deref(), "--title")?;
        let base = required(self.base.as_deref(), "--base")?;
        Ok((title, head, base))
    }

    /// Request for a pull request from the current branch.
    ///
    /// Owner and repository are left to the session, which already holds the
    /// configured values.
    #[must_use]
    pub fn creation_request(&self) -> PullRequestCreationRequest {
        PullRequestCreationRequest {
            title: self.title.clone(),
            base: self.base.clone(),
            owner: None,
            repository: None,
        }
    }

    /// API base: `api_url` when set, else derived from the `origin` host,
    /// else `https://api.github.com`.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::InvalidUrl`] for an unparseable `api_url`.
    pub fn api_base(
        &self,
        discovered: Result<&LocalRepository, &LocalDiscoveryError>,
    ) -> Result<Url, GitHubError> {
        if let Some(api_url) = self.api_url.as_deref() {
            return parse_api_base(api_url);
        }
        discovered.map_or_else(
            |_| parse_api_base(DEFAULT_API_BASE),
            |local| {
                RepositoryLocator::from_github_origin(local.github_origin())
                    .map(|locator| locator.api_base().clone())
            },
        )
    }

    /// Default repository: configured `owner`/`repo`, each falling back to
    /// the discovered `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Configuration`] when a setting is missing
    /// and the working directory is not a repository, or
    /// [`WorkflowError::Discovery`] when the repository's `origin` could not
    /// be resolved.
    pub fn repository_locator(
        &self,
        api_base: Url,
        discovered: Result<&LocalRepository, &LocalDiscoveryError>,
    ) -> Result<RepositoryLocator, WorkflowError> {
        let owner = match (self.owner.as_deref(), discovered) {
            (Some(owner), _) => owner,
            (None, Ok(local)) => local.owner(),
            (None, Err(error)) => return Err(unresolved("owner", "--owner", error)),
        };
        let repo = match (self.repo.as_deref(), discovered) {
            (Some(repo), _) => repo,
            (None, Ok(local)) => local.repository(),
            (None, Err(error)) => return Err(unresolved("name", "--repo", error)),
        };
        Ok(RepositoryLocator::new(api_base, owner, repo)?)
    }
}

fn required<'a>(value: Option<&'a str>, flag: &str) -> Result<&'a str, WorkflowError> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| WorkflowError::Configuration {
            message: format!("{flag} is required when opening a pull request with --head"),
        })
}

/// Outside a repository the missing setting is reported; otherwise the
/// reason `origin` could not be used.
fn unresolved(setting: &str, flag: &str, error: &LocalDiscoveryError) -> WorkflowError {
    match error {
        LocalDiscoveryError::NotARepository => WorkflowError::Configuration {
            message: format!(
                "repository {setting} is required (use {flag} or run inside a GitHub clone)"
            ),
        },
        other => WorkflowError::Discovery(other.clone()),
    }
}

#[cfg(test)]
mod tests;
