//! Pullwright CLI entrypoint.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use pullwright::{PullwrightConfig, WorkflowError};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode, WorkflowError> {
    let config = load_config()?;
    cli::run(&config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`WorkflowError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<PullwrightConfig, WorkflowError> {
    PullwrightConfig::load().map_err(|error| WorkflowError::Configuration {
        message: error.to_string(),
    })
}
