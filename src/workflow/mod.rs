//! Pull request workflow: session state, request defaulting and the
//! orchestrator tying GitHub, git and the terminal together.

mod error;
mod orchestrator;
mod request;
mod session;

pub use error::WorkflowError;
pub use orchestrator::PullRequestOrchestrator;
pub use request::{PullRequestCreationRequest, ResolvedPullRequest};
pub use session::{DEFAULT_BRANCH_PREFIX, DEFAULT_REVIEW_COMMENT, SessionContext};
