//! Local Git repository access.
//!
//! Discovery finds the repository enclosing the working directory and reads
//! the GitHub owner and repository from its `origin` remote. The
//! [`VersionControl`] trait covers the fetch, checkout, push and HEAD queries
//! the pull request workflow performs.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use pullwright::local::discover_repository;
//!
//! match discover_repository(Path::new(".")) {
//!     Ok(local_repo) => {
//!         println!("Found repository: {}/{}", local_repo.owner(), local_repo.repository());
//!     }
//!     Err(e) => eprintln!("Discovery failed: {e}"),
//! }
//! ```

mod discovery;
mod error;
mod remote;
mod version_control;

pub use discovery::{LocalRepository, discover_repository};
pub use error::{GitOperationError, LocalDiscoveryError};
pub use remote::{GitHubOrigin, parse_github_remote};
pub use version_control::{Git2VersionControl, VersionControl};

#[cfg(test)]
pub use version_control::MockVersionControl;
