//! Presenter drawing spinners, status lines and tables on the terminal.

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;
use tabled::settings::Style;

use super::{Presenter, PullRequestRow};

const SPINNER_TICK: Duration = Duration::from_millis(80);

/// Status lines go to stderr; tables go to stdout so they can be piped.
#[derive(Default)]
pub struct TerminalPresenter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl std::fmt::Debug for TerminalPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalPresenter").finish_non_exhaustive()
    }
}

impl TerminalPresenter {
    /// Creates a presenter with no running spinner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn replace_spinner(&self, next: Option<ProgressBar>) -> Option<ProgressBar> {
        self.spinner
            .lock()
            .ok()
            .and_then(|mut slot| std::mem::replace(&mut *slot, next))
    }

    /// Clears any running spinner, then prints `symbol message` to stderr.
    fn status(&self, symbol: &str, message: &str) {
        if let Some(spinner) = self.replace_spinner(None) {
            spinner.finish_and_clear();
        }
        write_line(&mut io::stderr().lock(), &format!("{symbol} {message}"));
    }
}

fn write_line(writer: &mut impl Write, line: &str) {
    if let Err(error) = writeln!(writer, "{line}") {
        tracing::warn!(%error, "failed to write terminal output");
    }
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(SPINNER_TICK);
    spinner
}

/// Renders rows as a rounded table with a header line.
#[must_use]
pub fn render_rows(rows: &[PullRequestRow]) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

impl Presenter for TerminalPresenter {
    fn start(&self, message: &str) {
        if let Some(previous) = self.replace_spinner(Some(spinner(message))) {
            previous.finish_and_clear();
        }
    }

    fn update(&self, message: &str) {
        let running = self
            .spinner
            .lock()
            .ok()
            .and_then(|slot| slot.as_ref().map(ProgressBar::clone));
        running.map_or_else(
            || write_line(&mut io::stderr().lock(), message),
            |spinner| spinner.set_message(message.to_owned()),
        );
    }

    fn succeed(&self, message: &str) {
        self.status("✔", message);
    }

    fn warn(&self, message: &str) {
        self.status("⚠", message);
    }

    fn fail(&self, message: &str) {
        self.status("✖", message);
    }

    fn info(&self, message: &str) {
        self.status("ℹ", message);
    }

    fn render_table(&self, rows: &[PullRequestRow]) {
        if let Some(spinner) = self.replace_spinner(None) {
            spinner.finish_and_clear();
        }
        write_line(&mut io::stdout().lock(), &render_rows(rows));
    }

    fn open_url(&self, url: &str) {
        if let Err(error) = open::that(url) {
            tracing::warn!(%error, url, "failed to open browser");
            self.warn(&format!("Could not open a browser; visit {url}"));
        }
    }
}
