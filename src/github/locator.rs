//! Typed identities for repositories and pull requests on a GitHub host.

use url::Url;

use super::error::GitHubError;
use crate::local::GitHubOrigin;

/// API base used for `github.com` repositories.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, GitHubError> {
        if value.is_empty() {
            return Err(GitHubError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, GitHubError> {
        if value.is_empty() {
            return Err(GitHubError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request (or issue) number. Zero is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Validates a pull request number.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::InvalidPullRequestNumber`] for zero.
    pub const fn new(value: u64) -> Result<Self, GitHubError> {
        if value == 0 {
            return Err(GitHubError::InvalidPullRequestNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::MissingToken`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, GitHubError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GitHubError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Parses an API base URL such as `https://ghe.example.com/api/v3`.
///
/// # Errors
///
/// Returns [`GitHubError::InvalidUrl`] when the value is not an absolute URL.
pub fn parse_api_base(input: &str) -> Result<Url, GitHubError> {
    Url::parse(input.trim()).map_err(|error| GitHubError::InvalidUrl(format!("{input}: {error}")))
}

fn default_api_base() -> Result<Url, GitHubError> {
    parse_api_base(DEFAULT_API_BASE)
}

/// Derives the API base for a web host: `api.github.com` for `github.com`,
/// `<host>/api/v3` for GitHub Enterprise.
fn api_base_for_host(scheme: &str, host: &str, port: Option<u16>) -> Result<Url, GitHubError> {
    if host.eq_ignore_ascii_case("github.com") {
        return default_api_base();
    }

    let authority = if host.contains(':') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let mut api_url = Url::parse(&format!("{scheme}://{authority}"))
        .map_err(|error| GitHubError::InvalidUrl(error.to_string()))?;
    api_url
        .set_port(port)
        .map_err(|()| GitHubError::InvalidUrl("invalid port".to_owned()))?;
    api_url.set_path("api/v3");
    Ok(api_url)
}

/// Repository on a specific GitHub host.
///
/// # Example
///
/// ```
/// use pullwright::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse("https://github.com/acme/widgets")
///     .expect("should parse repository URL");
/// assert_eq!(locator.owner().as_str(), "acme");
/// assert_eq!(locator.repository().as_str(), "widgets");
/// assert_eq!(locator.api_base().as_str(), "https://api.github.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a locator for `owner/repo` served by the given API base.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::MissingPathSegments`] when owner or repo is empty.
    pub fn new(api_base: Url, owner: &str, repo: &str) -> Result<Self, GitHubError> {
        Ok(Self {
            api_base,
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repo)?,
        })
    }

    /// Creates a locator for a `github.com` repository.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::MissingPathSegments`] when owner or repo is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, GitHubError> {
        Self::new(default_api_base()?, owner, repo)
    }

    /// Parses a repository web URL in the form `https://<host>/<owner>/<repo>`.
    ///
    /// Trailing path segments are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::InvalidUrl`] when parsing fails or
    /// [`GitHubError::MissingPathSegments`] when owner or repo is missing.
    pub fn parse(input: &str) -> Result<Self, GitHubError> {
        let parsed =
            Url::parse(input).map_err(|error| GitHubError::InvalidUrl(error.to_string()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or(GitHubError::MissingPathSegments)?;
        let owner = segments.next().ok_or(GitHubError::MissingPathSegments)?;
        let repo = segments.next().ok_or(GitHubError::MissingPathSegments)?;

        let host = parsed
            .host_str()
            .ok_or_else(|| GitHubError::InvalidUrl("URL must include a host".to_owned()))?;
        let api_base = api_base_for_host(parsed.scheme(), host, parsed.port())?;

        Self::new(api_base, owner, repo)
    }

    /// Creates a locator from a discovered git origin, deriving the API base
    /// from the origin host.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::InvalidUrl`] when the Enterprise host does not
    /// form a valid URL.
    pub fn from_github_origin(origin: &GitHubOrigin) -> Result<Self, GitHubError> {
        let api_base = api_base_for_host("https", origin.host(), origin.port())?;
        Self::new(api_base, origin.owner(), origin.repository())
    }

    /// Returns a locator for another repository on the same host.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::MissingPathSegments`] when owner or repo is empty.
    pub fn sibling(&self, owner: &str, repo: &str) -> Result<Self, GitHubError> {
        Self::new(self.api_base.clone(), owner, repo)
    }

    /// API base URL for this repository's host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// `owner/repo` display form.
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner.as_str(), self.repository.as_str())
    }

    pub(crate) fn pulls_path(&self) -> String {
        format!("/repos/{}/pulls", self.slug())
    }

    /// Locator for pull request `number` in this repository.
    #[must_use]
    pub fn pull_request(&self, number: PullRequestNumber) -> PullRequestLocator {
        PullRequestLocator {
            repository: self.clone(),
            number,
        }
    }
}

/// A single pull request within a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    repository: RepositoryLocator,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Repository containing the pull request.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryLocator {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    pub(crate) fn pull_request_path(&self) -> String {
        format!("/repos/{}/pulls/{}", self.repository.slug(), self.number.get())
    }

    /// Pull requests share the issue comment endpoint.
    pub(crate) fn comments_path(&self) -> String {
        format!(
            "/repos/{}/issues/{}/comments",
            self.repository.slug(),
            self.number.get()
        )
    }
}
