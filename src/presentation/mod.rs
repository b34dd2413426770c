//! Terminal-facing output for the pull request workflow.
//!
//! The workflow talks to a [`Presenter`] for every status line, table and
//! browser hand-off, so tests can record output instead of drawing it.

mod relative_time;
mod terminal;
#[cfg(any(test, feature = "test-support"))]
mod test_support;

use chrono::{DateTime, Utc};
use tabled::Tabled;

use crate::github::PullRequestSummary;

pub use relative_time::describe_since;
pub use terminal::{TerminalPresenter, render_rows};
#[cfg(any(test, feature = "test-support"))]
pub use test_support::{PresenterEvent, RecordingPresenter};

/// Sink for progress, results and hand-offs to the browser.
///
/// `start` begins a spinner that `update` relabels; `succeed` and `fail`
/// end it. `warn` and `info` are standalone status lines.
pub trait Presenter: Send + Sync {
    /// Begins a long-running step.
    fn start(&self, message: &str);
    /// Relabels the running step.
    fn update(&self, message: &str);
    /// Ends the running step successfully.
    fn succeed(&self, message: &str);
    /// Reports a recoverable condition.
    fn warn(&self, message: &str);
    /// Ends the running step with an error.
    fn fail(&self, message: &str);
    /// Prints an informational line.
    fn info(&self, message: &str);
    /// Prints a pull request table.
    fn render_table(&self, rows: &[PullRequestRow]);
    /// Opens `url` in the user's browser.
    fn open_url(&self, url: &str);
}

/// One line of the open pull request table.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct PullRequestRow {
    /// Pull request number, prefixed with `#`.
    #[tabled(rename = "#")]
    pub number: String,
    /// Author login.
    #[tabled(rename = "Author")]
    pub author: String,
    /// Age relative to the time of listing.
    #[tabled(rename = "Created")]
    pub created: String,
    /// State in upper case.
    #[tabled(rename = "State")]
    pub state: String,
    /// Pull request title.
    #[tabled(rename = "Title")]
    pub title: String,
}

impl PullRequestRow {
    /// Builds a row, describing `created_at` relative to `now`.
    #[must_use]
    pub fn from_summary(summary: &PullRequestSummary, now: DateTime<Utc>) -> Self {
        let created = summary
            .created_at
            .as_deref()
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map_or_else(
                || "unknown".to_owned(),
                |timestamp| describe_since(timestamp.with_timezone(&Utc), now),
            );

        Self {
            number: format!("#{}", summary.number),
            author: summary.author.clone().unwrap_or_else(|| "unknown".to_owned()),
            created,
            state: summary
                .state
                .as_deref()
                .unwrap_or("unknown")
                .to_uppercase(),
            title: summary.title.clone().unwrap_or_default(),
        }
    }
}
