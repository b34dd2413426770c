//! Presenter that records calls for assertions.

use std::sync::Mutex;

use super::{Presenter, PullRequestRow};

/// A single presenter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    /// `start` was called.
    Start(String),
    /// `update` was called.
    Update(String),
    /// `succeed` was called.
    Succeed(String),
    /// `warn` was called.
    Warn(String),
    /// `fail` was called.
    Fail(String),
    /// `info` was called.
    Info(String),
    /// `render_table` was called.
    Table(Vec<PullRequestRow>),
    /// `open_url` was called.
    OpenUrl(String),
}

/// Collects every presenter call in order.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<PresenterEvent>>,
}

impl RecordingPresenter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the calls recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Messages passed to `fail`.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PresenterEvent::Fail(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Tables passed to `render_table`.
    #[must_use]
    pub fn tables(&self) -> Vec<Vec<PullRequestRow>> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PresenterEvent::Table(rows) => Some(rows),
                _ => None,
            })
            .collect()
    }

    /// URLs passed to `open_url`.
    #[must_use]
    pub fn opened_urls(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PresenterEvent::OpenUrl(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: PresenterEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Presenter for RecordingPresenter {
    fn start(&self, message: &str) {
        self.record(PresenterEvent::Start(message.to_owned()));
    }

    fn update(&self, message: &str) {
        self.record(PresenterEvent::Update(message.to_owned()));
    }

    fn succeed(&self, message: &str) {
        self.record(PresenterEvent::Succeed(message.to_owned()));
    }

    fn warn(&self, message: &str) {
        self.record(PresenterEvent::Warn(message.to_owned()));
    }

    fn fail(&self, message: &str) {
        self.record(PresenterEvent::Fail(message.to_owned()));
    }

    fn info(&self, message: &str) {
        self.record(PresenterEvent::Info(message.to_owned()));
    }

    fn render_table(&self, rows: &[PullRequestRow]) {
        self.record(PresenterEvent::Table(rows.to_vec()));
    }

    fn open_url(&self, url: &str) {
        self.record(PresenterEvent::OpenUrl(url.to_owned()));
    }
}
