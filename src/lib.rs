//! Pullwright library crate for GitHub pull request orchestration.
//!
//! The library lists open pull requests, fetches a pull request branch for
//! local review, posts the review-start comment, and opens pull requests
//! either from explicit branches or from the current branch. GitHub access
//! goes through Octocrab, git access through `git2`, and terminal output
//! through a [`presentation::Presenter`].

pub mod config;
pub mod github;
pub mod local;
pub mod presentation;
pub mod workflow;

pub use config::{OperationMode, PullwrightConfig};
pub use github::{
    GitHubError, OctocrabGateway, PersonalAccessToken, PullRequestGateway, PullRequestLocator,
    PullRequestNumber, RepositoryLocator,
};
pub use local::{Git2VersionControl, LocalRepository, VersionControl, discover_repository};
pub use presentation::{Presenter, TerminalPresenter};
pub use workflow::{
    PullRequestCreationRequest, PullRequestOrchestrator, SessionContext, WorkflowError,
};
