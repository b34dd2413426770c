//! Reads GitHub owner and repository names out of git remote URLs.

use url::Url;

use super::error::LocalDiscoveryError;

/// GitHub repository named by a remote URL.
///
/// `github.com` is kept apart from Enterprise hosts because only the latter
/// need a host-specific API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubOrigin {
    /// Repository on `github.com`.
    GitHubCom {
        /// User or organisation owning the repository.
        owner: String,
        /// Repository name without any `.git` suffix.
        repository: String,
    },
    /// Repository on a GitHub Enterprise host.
    Enterprise {
        /// Host name, e.g. `ghe.example.com`.
        host: String,
        /// Explicit port from a URL-style remote.
        port: Option<u16>,
        /// User or organisation owning the repository.
        owner: String,
        /// Repository name without any `.git` suffix.
        repository: String,
    },
}

impl GitHubOrigin {
    fn new(host: &str, port: Option<u16>, owner: &str, repository: &str) -> Self {
        if host.eq_ignore_ascii_case("github.com") {
            return Self::GitHubCom {
                owner: owner.to_owned(),
                repository: repository.to_owned(),
            };
        }
        Self::Enterprise {
            host: host.to_owned(),
            port,
            owner: owner.to_owned(),
            repository: repository.to_owned(),
        }
    }

    /// Repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        match self {
            Self::GitHubCom { owner, .. } | Self::Enterprise { owner, .. } => owner,
        }
    }

    /// Repository name.
    #[must_use]
    pub fn repository(&self) -> &str {
        match self {
            Self::GitHubCom { repository, .. } | Self::Enterprise { repository, .. } => repository,
        }
    }

    /// Host serving the repository.
    #[must_use]
    pub fn host(&self) -> &str {
        match self {
            Self::GitHubCom { .. } => "github.com",
            Self::Enterprise { host, .. } => host,
        }
    }

    /// Explicit port, only ever present for Enterprise hosts.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        match self {
            Self::GitHubCom { .. } => None,
            Self::Enterprise { port, .. } => *port,
        }
    }

    /// Whether the origin lives on `github.com`.
    #[must_use]
    pub const fn is_github_com(&self) -> bool {
        matches!(self, Self::GitHubCom { .. })
    }
}

/// Parses a remote URL into a [`GitHubOrigin`].
///
/// Accepts scp-like addresses (`git@github.com:owner/repo.git`) and URL
/// forms (`https://`, `ssh://`, `git://`, optionally with a port). The path
/// must be exactly `owner/repo`, with an optional `.git` suffix and trailing
/// slash.
///
/// # Errors
///
/// Returns [`LocalDiscoveryError::InvalidRemoteUrl`] when no host or no
/// `owner/repo` pair can be read from `url`.
pub fn parse_github_remote(url: &str) -> Result<GitHubOrigin, LocalDiscoveryError> {
    let invalid = || LocalDiscoveryError::InvalidRemoteUrl {
        url: url.to_owned(),
    };
    let trimmed = url.trim();

    let (host, port, path) = if trimmed.contains("://") {
        let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
        let host = parsed.host_str().ok_or_else(invalid)?.to_owned();
        (host, parsed.port(), parsed.path().to_owned())
    } else {
        let (host, path) = split_scp_address(trimmed).ok_or_else(invalid)?;
        (host.to_owned(), None, path.to_owned())
    };

    let (owner, repository) = owner_and_repository(&path).ok_or_else(invalid)?;
    Ok(GitHubOrigin::new(&host, port, owner, repository))
}

/// Splits `[user@]host:path`. Local paths never match because the part
/// before the colon may not contain a slash.
fn split_scp_address(address: &str) -> Option<(&str, &str)> {
    let (authority, path) = address.split_once(':')?;
    if authority.contains('/') {
        return None;
    }
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    (!host.is_empty()).then_some((host, path))
}

fn owner_and_repository(path: &str) -> Option<(&str, &str)> {
    let trimmed = path.trim_matches('/');
    let (owner, repository_segment) = trimmed.split_once('/')?;
    let repository = repository_segment
        .strip_suffix(".git")
        .unwrap_or(repository_segment);

    let is_segment = |segment: &str| !segment.is_empty() && !segment.contains('/');
    (is_segment(owner) && is_segment(repository)).then_some((owner, repository))
}

#[cfg(test)]
mod tests;
