//! Command dispatch for the `pullwright` binary.
//!
//! [`Command`] is resolved from configuration before any network or git
//! access, so flag mistakes surface as plain setup errors. Once the session
//! is built, failures are reported by the presenter and only decide the exit
//! status.

use std::env;
use std::process::ExitCode;

use pullwright::{
    Git2VersionControl, OctocrabGateway, OperationMode, Presenter, PullRequestCreationRequest,
    PullRequestGateway, PullRequestOrchestrator, PullwrightConfig, SessionContext,
    TerminalPresenter, VersionControl, WorkflowError, discover_repository,
};

/// Operation to run, with its arguments validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'cfg> {
    /// List open pull requests.
    ListOpen {
        /// Draw the table of pull requests.
        render_table: bool,
    },
    /// Fetch a pull request into a review branch.
    FetchForReview(u64),
    /// Post the review-start comment.
    Comment(u64),
    /// Open a pull request from explicit branches.
    OpenDirect {
        /// Pull request title.
        title: &'cfg str,
        /// Head branch in the user's fork.
        head: &'cfg str,
        /// Target branch.
        base: &'cfg str,
    },
    /// Open a pull request from the current branch.
    CreateFromCurrentBranch(PullRequestCreationRequest),
}

impl<'cfg> Command<'cfg> {
    /// Resolves the command selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Configuration`] when direct mode lacks its
    /// title or base.
    pub fn from_config(config: &'cfg PullwrightConfig) -> Result<Self, WorkflowError> {
        Ok(match config.operation_mode() {
            OperationMode::ListOpen => Self::ListOpen {
                render_table: !config.no_table,
            },
            OperationMode::FetchForReview(number) => Self::FetchForReview(number),
            OperationMode::Comment(number) => Self::Comment(number),
            OperationMode::OpenDirect => {
                let (title, head, base) = config.require_direct_fields()?;
                Self::OpenDirect { title, head, base }
            }
            OperationMode::CreateFromCurrentBranch => {
                Self::CreateFromCurrentBranch(config.creation_request())
            }
        })
    }

    /// Runs the command against `orchestrator`.
    ///
    /// # Errors
    ///
    /// Returns the failure the orchestrator has already reported.
    pub async fn execute<G, V, P>(
        self,
        orchestrator: &PullRequestOrchestrator<'_, G, V, P>,
    ) -> Result<(), WorkflowError>
    where
        G: PullRequestGateway + ?Sized,
        V: VersionControl + ?Sized,
        P: Presenter + ?Sized,
    {
        match self {
            Self::ListOpen { render_table } => {
                orchestrator.list_open_pull_requests(render_table).await?;
            }
            Self::FetchForReview(number) => {
                orchestrator.fetch_pull_request_for_review(number).await?;
            }
            Self::Comment(number) => {
                orchestrator.create_comment(number).await?;
            }
            Self::OpenDirect { title, head, base } => {
                orchestrator
                    .open_pull_request_direct(title, head, base)
                    .await?;
            }
            Self::CreateFromCurrentBranch(request) => {
                orchestrator
                    .create_pull_request_from_current_branch(request)
                    .await?;
            }
        }
        Ok(())
    }
}

/// Builds the session from `config` and runs the selected command.
///
/// # Errors
///
/// Returns setup failures (configuration, token, username lookup) that no
/// presenter has shown yet. Failures of the command itself are already
/// reported and map to [`ExitCode::FAILURE`].
pub async fn run(config: &PullwrightConfig) -> Result<ExitCode, WorkflowError> {
    let command = Command::from_config(config)?;
    let working_dir = env::current_dir().map_err(|error| WorkflowError::Io {
        message: format!("failed to read the working directory: {error}"),
    })?;

    let discovered = discover_repository(&working_dir)
        .inspect_err(|error| tracing::debug!(%error, "no GitHub origin discovered"));
    let api_base = config.api_base(discovered.as_ref())?;
    let token = config.resolve_token()?;
    let gateway = OctocrabGateway::for_token(&token, &api_base)?;
    let locator = config.repository_locator(api_base, discovered.as_ref())?;
    let session = SessionContext::from_config(config, locator, &gateway).await?;

    let git = Git2VersionControl::new(working_dir);
    let presenter = TerminalPresenter::new();
    let orchestrator = PullRequestOrchestrator::new(&session, &gateway, &git, &presenter);

    Ok(match command.execute(&orchestrator).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(%error, "command failed");
            ExitCode::FAILURE
        }
    })
}
