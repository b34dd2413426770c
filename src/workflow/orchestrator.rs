//! The four pull request intents, driven against the gateway, git and the
//! presenter.

use chrono::Utc;

use crate::github::{
    CreatedPullRequest, NewPullRequest, PullRequestGateway, PullRequestNumber,
    PullRequestSummary, RepositoryLocator,
};
use crate::local::VersionControl;
use crate::presentation::{Presenter, PullRequestRow};

use super::error::WorkflowError;
use super::request::PullRequestCreationRequest;
use super::session::SessionContext;

/// Runs pull request operations for one session.
///
/// Every operation reports its own failure through [`Presenter::fail`]
/// exactly once and then returns it, so callers only decide the exit status.
pub struct PullRequestOrchestrator<'ctx, Gateway, Git, Output>
where
    Gateway: PullRequestGateway + ?Sized,
    Git: VersionControl + ?Sized,
    Output: Presenter + ?Sized,
{
    session: &'ctx SessionContext,
    gateway: &'ctx Gateway,
    git: &'ctx Git,
    presenter: &'ctx Output,
}

impl<'ctx, Gateway, Git, Output> PullRequestOrchestrator<'ctx, Gateway, Git, Output>
where
    Gateway: PullRequestGateway + ?Sized,
    Git: VersionControl + ?Sized,
    Output: Presenter + ?Sized,
{
    /// Wires the collaborators for `session`.
    #[must_use]
    pub const fn new(
        session: &'ctx SessionContext,
        gateway: &'ctx Gateway,
        git: &'ctx Git,
        presenter: &'ctx Output,
    ) -> Self {
        Self {
            session,
            gateway,
            git,
            presenter,
        }
    }

    /// Lists every open pull request of the session repository.
    ///
    /// An empty result is reported as information and never renders a
    /// table; otherwise `render_table` prints one row per pull request.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure after reporting it.
    pub async fn list_open_pull_requests(
        &self,
        render_table: bool,
    ) -> Result<Vec<PullRequestSummary>, WorkflowError> {
        let result = self.list_steps(render_table).await;
        self.report(result)
    }

    /// Fetches pull request `number` into `<prefix><number>`, announces the
    /// review with a comment and checks the branch out.
    ///
    /// Steps run in that order and stop at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::MissingCloneUrl`] when the head repository has
    /// no URL, or the failing gateway or git step, after reporting it.
    pub async fn fetch_pull_request_for_review(&self, number: u64) -> Result<(), WorkflowError> {
        let result = self.fetch_for_review_steps(number).await;
        self.report(result)
    }

    /// Posts the review-start comment on issue or pull request
    /// `issue_number` and returns the posted body.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure after reporting it.
    pub async fn create_comment(&self, issue_number: u64) -> Result<String, WorkflowError> {
        let result = self.comment_steps(issue_number).await;
        self.report(result)
    }

    /// Opens a pull request from `<username>:<head_branch>` into
    /// `base_branch` and shows it in the browser.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure after reporting it.
    pub async fn open_pull_request_direct(
        &self,
        title: &str,
        head_branch: &str,
        base_branch: &str,
    ) -> Result<CreatedPullRequest, WorkflowError> {
        let request =
            NewPullRequest::new(self.session.username(), head_branch, base_branch, title);
        let result = self.submit(self.session.locator(), &request).await;
        self.report(result)
    }

    /// Resolves missing fields of `request`, pushes the current branch and
    /// opens a pull request for it.
    ///
    /// # Errors
    ///
    /// Returns the failing git query, push or gateway call after reporting
    /// it.
    pub async fn create_pull_request_from_current_branch(
        &self,
        request: PullRequestCreationRequest,
    ) -> Result<CreatedPullRequest, WorkflowError> {
        let result = self.create_from_branch_steps(request).await;
        self.report(result)
    }

    async fn list_steps(
        &self,
        render_table: bool,
    ) -> Result<Vec<PullRequestSummary>, WorkflowError> {
        let locator = self.session.locator();
        self.presenter
            .start(&format!("Fetching open pull requests for {}", locator.slug()));
        let pulls = self.gateway.list_open_pull_requests(locator).await?;

        if pulls.is_empty() {
            self.presenter.info("No pull requests found");
            return Ok(pulls);
        }

        self.presenter.succeed(&format!(
            "Found {} open pull request(s) in {}",
            pulls.len(),
            locator.slug()
        ));
        if render_table {
            let now = Utc::now();
            let rows: Vec<PullRequestRow> = pulls
                .iter()
                .map(|pull| PullRequestRow::from_summary(pull, now))
                .collect();
            self.presenter.render_table(&rows);
        }
        Ok(pulls)
    }

    async fn fetch_for_review_steps(&self, number: u64) -> Result<(), WorkflowError> {
        let locator = self
            .session
            .locator()
            .pull_request(PullRequestNumber::new(number)?);
        self.presenter
            .start(&format!("Looking up pull request #{number}"));
        let detail = self.gateway.pull_request(&locator).await?;

        let branch = self.session.review_branch_name(number);
        let remote_url = detail
            .remote_url(self.session.prefers_ssh())
            .ok_or(WorkflowError::MissingCloneUrl { number })?;

        self.presenter
            .update(&format!("Fetching {} into {branch}", detail.head_ref));
        self.git.fetch(remote_url, &detail.head_ref, &branch)?;

        self.presenter.update("Posting review comment");
        self.gateway
            .create_issue_comment(&locator, self.session.review_comment())
            .await?;

        self.presenter.update(&format!("Checking out {branch}"));
        self.git.checkout(&branch)?;

        self.presenter
            .succeed(&format!("Pull request #{number} is checked out as {branch}"));
        Ok(())
    }

    async fn comment_steps(&self, issue_number: u64) -> Result<String, WorkflowError> {
        let locator = self
            .session
            .locator()
            .pull_request(PullRequestNumber::new(issue_number)?);
        let body = self.session.review_comment();

        self.presenter
            .start(&format!("Commenting on #{issue_number}"));
        self.gateway.create_issue_comment(&locator, body).await?;
        self.presenter
            .succeed(&format!("Commented on #{issue_number}: {body}"));
        Ok(body.to_owned())
    }

    async fn create_from_branch_steps(
        &self,
        request: PullRequestCreationRequest,
    ) -> Result<CreatedPullRequest, WorkflowError> {
        self.presenter.start("Resolving pull request details");
        let resolved = request.resolve(self.git, self.session)?;
        let locator = self
            .session
            .locator_for(&resolved.owner, &resolved.repository)?;

        self.presenter
            .update(&format!("Pushing {} to origin", resolved.head));
        self.git.push(&resolved.head)?;

        self.presenter.info(&format!(
            "Creating pull request on {}/{}:{}",
            resolved.owner, resolved.repository, resolved.base
        ));
        let new_pull = NewPullRequest::new(
            self.session.username(),
            &resolved.head,
            &resolved.base,
            &resolved.title,
        );
        self.submit(&locator, &new_pull).await
    }

    async fn submit(
        &self,
        locator: &RepositoryLocator,
        request: &NewPullRequest,
    ) -> Result<CreatedPullRequest, WorkflowError> {
        self.presenter.start(&format!(
            "Opening pull request {} into {}:{}",
            request.head,
            locator.slug(),
            request.base
        ));
        let created = self.gateway.create_pull_request(locator, request).await?;
        self.presenter.succeed(&format!(
            "Opened pull request #{}: {}",
            created.number, created.html_url
        ));
        self.presenter.open_url(&created.html_url);
        Ok(created)
    }

    fn report<T>(&self, result: Result<T, WorkflowError>) -> Result<T, WorkflowError> {
        result.inspect_err(|error| {
            tracing::debug!(
                %error,
                repository = %self.session.locator().slug(),
                "operation failed"
            );
            self.presenter.fail(&error.to_string());
        })
    }
}
