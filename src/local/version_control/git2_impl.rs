//! git2-backed [`VersionControl`].

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Mutex;

use git2::build::CheckoutBuilder;
use git2::{
    BranchType, Cred, CredentialType, Direction, ErrorCode, FetchOptions, PushOptions,
    Reference, RemoteCallbacks, Repository,
};

use super::VersionControl;
use crate::local::error::GitOperationError;

const ORIGIN_REMOTE: &str = "origin";
const ORIGIN_HEAD: &str = "refs/remotes/origin/HEAD";
const MAX_CREDENTIAL_ATTEMPTS: u8 = 3;

/// Version control over the repository enclosing a start path.
///
/// The repository is opened on first use so that commands which never touch
/// git can run outside a working tree. `git2::Repository` is not `Sync`, so
/// the handle sits behind a `Mutex`.
pub struct Git2VersionControl {
    start_path: PathBuf,
    repo: Mutex<Option<Repository>>,
}

impl std::fmt::Debug for Git2VersionControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git2VersionControl")
            .field("start_path", &self.start_path)
            .finish_non_exhaustive()
    }
}

impl Git2VersionControl {
    /// Discovers the repository from `start_path` when first needed.
    #[must_use]
    pub fn new(start_path: impl Into<PathBuf>) -> Self {
        Self {
            start_path: start_path.into(),
            repo: Mutex::new(None),
        }
    }

    fn with_repo<T>(
        &self,
        operation: impl FnOnce(&Repository) -> Result<T, GitOperationError>,
    ) -> Result<T, GitOperationError> {
        let mut slot = self
            .repo
            .lock()
            .map_err(|_| GitOperationError::RepositoryNotAvailable {
                message: "repository lock poisoned".to_owned(),
            })?;
        if slot.is_none() {
            let repo = Repository::discover(&self.start_path).map_err(|error| {
                GitOperationError::RepositoryNotAvailable {
                    message: error.message().to_owned(),
                }
            })?;
            *slot = Some(repo);
        }
        slot.as_ref().map_or_else(
            || {
                Err(GitOperationError::RepositoryNotAvailable {
                    message: self.start_path.display().to_string(),
                })
            },
            operation,
        )
    }
}

/// Credentials in order: ssh-agent, the configured credential helper, then
/// libgit2 defaults. Gives up after a few rounds so a bad key cannot loop.
fn remote_callbacks<'cb>() -> RemoteCallbacks<'cb> {
    let mut callbacks = RemoteCallbacks::new();
    let mut attempts: u8 = 0;
    callbacks.credentials(move |url, username, allowed| {
        attempts = attempts.saturating_add(1);
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str("no usable credentials for remote"));
        }
        if allowed.contains(CredentialType::SSH_KEY) {
            return Cred::ssh_key_from_agent(username.unwrap_or("git"));
        }
        if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
            let config = git2::Config::open_default()?;
            return Cred::credential_helper(&config, url, username);
        }
        Cred::default()
    });
    callbacks
}

fn head_reference(repo: &Repository) -> Result<Reference<'_>, GitOperationError> {
    repo.head().map_err(|error| match error.code() {
        ErrorCode::UnbornBranch | ErrorCode::NotFound => GitOperationError::NoCommits,
        _ => GitOperationError::from(error),
    })
}

fn local_branch<'repo>(
    repo: &'repo Repository,
    name: &str,
) -> Result<git2::Branch<'repo>, GitOperationError> {
    repo.find_branch(name, BranchType::Local).map_err(|error| {
        if error.code() == ErrorCode::NotFound {
            GitOperationError::BranchNotFound {
                name: name.to_owned(),
            }
        } else {
            GitOperationError::from(error)
        }
    })
}

/// Short name of the branch HEAD points at, including an unborn one.
fn checked_out_branch(repo: &Repository) -> Option<String> {
    let head = repo.find_reference("HEAD").ok()?;
    head.symbolic_target()?
        .strip_prefix("refs/heads/")
        .map(ToOwned::to_owned)
}

fn remote_advertises_branch(
    remote: &mut git2::Remote<'_>,
    branch: &str,
) -> Result<bool, git2::Error> {
    let wanted = format!("refs/heads/{branch}");
    let connection = remote.connect_auth(Direction::Fetch, Some(remote_callbacks()), None)?;
    Ok(connection.list()?.iter().any(|head| head.name() == wanted))
}

fn default_branch_from_origin_head(repo: &Repository) -> Option<String> {
    let reference = repo.find_reference(ORIGIN_HEAD).ok()?;
    let target = reference.symbolic_target()?;
    target
        .strip_prefix("refs/remotes/origin/")
        .map(ToOwned::to_owned)
}

fn default_branch_from_remote(repo: &Repository) -> Result<String, GitOperationError> {
    let mut remote = repo
        .find_remote(ORIGIN_REMOTE)
        .map_err(|_| GitOperationError::DefaultBranchUnknown)?;
    let connection = remote
        .connect_auth(Direction::Fetch, Some(remote_callbacks()), None)
        .map_err(|error| GitOperationError::FetchFailed {
            message: error.message().to_owned(),
        })?;
    let head = connection
        .default_branch()
        .map_err(|_| GitOperationError::DefaultBranchUnknown)?;
    head.as_str()
        .and_then(|name| name.strip_prefix("refs/heads/"))
        .map(ToOwned::to_owned)
        .ok_or(GitOperationError::DefaultBranchUnknown)
}

impl VersionControl for Git2VersionControl {
    fn fetch(
        &self,
        remote_url: &str,
        remote_branch: &str,
        local_branch_name: &str,
    ) -> Result<(), GitOperationError> {
        tracing::debug!(
            remote_url,
            remote_branch,
            local_branch = local_branch_name,
            "fetching branch"
        );
        self.with_repo(|repo| {
            if checked_out_branch(repo).as_deref() == Some(local_branch_name) {
                return Err(GitOperationError::FetchFailed {
                    message: format!(
                        "refusing to fetch into branch '{local_branch_name}' while it is checked out"
                    ),
                });
            }

            let fetch_failed = |error: git2::Error| GitOperationError::FetchFailed {
                message: error.message().to_owned(),
            };
            let mut remote = repo.remote_anonymous(remote_url).map_err(fetch_failed)?;
            if !remote_advertises_branch(&mut remote, remote_branch).map_err(fetch_failed)? {
                return Err(GitOperationError::FetchFailed {
                    message: format!("branch '{remote_branch}' not found on {remote_url}"),
                });
            }

            let refspec = format!("refs/heads/{remote_branch}:refs/heads/{local_branch_name}");
            let mut options = FetchOptions::new();
            options.remote_callbacks(remote_callbacks());
            remote
                .fetch(&[refspec.as_str()], Some(&mut options), None)
                .map_err(fetch_failed)
        })
    }

    fn checkout(&self, branch: &str) -> Result<(), GitOperationError> {
        tracing::debug!(branch, "checking out branch");
        self.with_repo(|repo| {
            let reference = local_branch(repo, branch)?.into_reference();
            let name = reference
                .name()
                .ok_or_else(|| GitOperationError::BranchNotFound {
                    name: branch.to_owned(),
                })?
                .to_owned();
            let tree = reference.peel_to_tree()?;

            let mut checkout = CheckoutBuilder::new();
            checkout.safe();
            repo.checkout_tree(tree.as_object(), Some(&mut checkout))
                .map_err(|error| GitOperationError::CheckoutFailed {
                    message: error.message().to_owned(),
                })?;
            repo.set_head(&name)
                .map_err(|error| GitOperationError::CheckoutFailed {
                    message: error.message().to_owned(),
                })
        })
    }

    fn push(&self, branch: &str) -> Result<(), GitOperationError> {
        tracing::debug!(branch, remote = ORIGIN_REMOTE, "pushing branch");
        self.with_repo(|repo| {
            local_branch(repo, branch)?;
            let mut remote = repo.find_remote(ORIGIN_REMOTE)?;
            let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");

            let rejection = RefCell::new(None::<String>);
            let mut callbacks = remote_callbacks();
            callbacks.push_update_reference(|_reference, status| {
                if let Some(message) = status {
                    *rejection.borrow_mut() = Some(message.to_owned());
                }
                Ok(())
            });
            let mut options = PushOptions::new();
            options.remote_callbacks(callbacks);

            remote
                .push(&[refspec.as_str()], Some(&mut options))
                .map_err(|error| GitOperationError::PushRejected {
                    branch: branch.to_owned(),
                    message: error.message().to_owned(),
                })?;
            drop(options);

            rejection.into_inner().map_or(Ok(()), |message| {
                Err(GitOperationError::PushRejected {
                    branch: branch.to_owned(),
                    message,
                })
            })
        })
    }

    fn current_branch(&self) -> Result<String, GitOperationError> {
        self.with_repo(|repo| {
            let head = head_reference(repo)?;
            if !head.is_branch() {
                return Err(GitOperationError::DetachedHead);
            }
            head.shorthand()
                .map(ToOwned::to_owned)
                .ok_or_else(|| GitOperationError::Git {
                    message: "branch name is not valid UTF-8".to_owned(),
                })
        })
    }

    fn last_commit_message(&self) -> Result<String, GitOperationError> {
        self.with_repo(|repo| {
            let commit = head_reference(repo)?.peel_to_commit()?;
            Ok(commit.summary().unwrap_or_default().to_owned())
        })
    }

    fn default_branch(&self) -> Result<String, GitOperationError> {
        self.with_repo(|repo| {
            if let Some(branch) = default_branch_from_origin_head(repo) {
                return Ok(branch);
            }
            tracing::debug!("origin/HEAD missing; asking the remote for its default branch");
            default_branch_from_remote(repo)
        })
    }
}
