//! Locates the repository enclosing a path and reads its GitHub origin.

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};

use super::error::LocalDiscoveryError;
use super::remote::{GitHubOrigin, parse_github_remote};

const ORIGIN_REMOTE: &str = "origin";

/// Working copy whose `origin` remote points at GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    workdir: PathBuf,
    github_origin: GitHubOrigin,
}

impl LocalRepository {
    /// Root of the working tree.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Parsed `origin` remote.
    #[must_use]
    pub const fn github_origin(&self) -> &GitHubOrigin {
        &self.github_origin
    }

    /// Owner named by `origin`.
    #[must_use]
    pub fn owner(&self) -> &str {
        self.github_origin.owner()
    }

    /// Repository named by `origin`.
    #[must_use]
    pub fn repository(&self) -> &str {
        self.github_origin.repository()
    }
}

/// Searches upward from `start_path` for a repository and parses its
/// `origin` remote.
///
/// # Errors
///
/// Returns [`LocalDiscoveryError::NotARepository`] outside a working tree,
/// [`LocalDiscoveryError::NoRemotes`] or
/// [`LocalDiscoveryError::RemoteNotFound`] when `origin` is absent, and
/// [`LocalDiscoveryError::InvalidRemoteUrl`] when its URL names no
/// `owner/repo`.
pub fn discover_repository(start_path: &Path) -> Result<LocalRepository, LocalDiscoveryError> {
    let repo = Repository::discover(start_path).map_err(|error| {
        if error.code() == ErrorCode::NotFound {
            LocalDiscoveryError::NotARepository
        } else {
            LocalDiscoveryError::from(error)
        }
    })?;
    let workdir = repo
        .workdir()
        .map(Path::to_path_buf)
        .ok_or(LocalDiscoveryError::NotARepository)?;

    let github_origin = origin_of(&repo)?;
    tracing::debug!(
        workdir = %workdir.display(),
        owner = github_origin.owner(),
        repository = github_origin.repository(),
        "discovered local repository"
    );

    Ok(LocalRepository {
        workdir,
        github_origin,
    })
}

fn origin_of(repo: &Repository) -> Result<GitHubOrigin, LocalDiscoveryError> {
    if repo.remotes()?.is_empty() {
        return Err(LocalDiscoveryError::NoRemotes);
    }

    let remote = repo.find_remote(ORIGIN_REMOTE).map_err(|error| {
        if error.code() == ErrorCode::NotFound {
            LocalDiscoveryError::RemoteNotFound {
                name: ORIGIN_REMOTE.to_owned(),
            }
        } else {
            LocalDiscoveryError::from(error)
        }
    })?;

    let url = remote
        .url()
        .ok_or_else(|| LocalDiscoveryError::InvalidRemoteUrl {
            url: "(no URL)".to_owned(),
        })?;
    parse_github_remote(url)
}
