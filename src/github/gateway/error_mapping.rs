//! Maps Octocrab failures onto [`GitHubError`] variants.

use http::StatusCode;

use crate::github::error::GitHubError;
use crate::github::rate_limit::RateLimitInfo;

pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// GitHub signals rate limiting with 403 or 429 plus a message or
/// documentation link mentioning the rate limit.
pub(super) fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> GitHubError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return if is_auth_failure(source.status_code) {
            GitHubError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        } else {
            GitHubError::Api {
                message: format!(
                    "{operation} failed with status {status}: {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        };
    }

    let message = format!("{operation} failed: {}", describe_error(error));
    if is_network_error(error) {
        return GitHubError::Network { message };
    }

    GitHubError::Api { message }
}

/// Single-line description built from the error's causes.
///
/// Octocrab's own `Display` appends a multi-line backtrace, so only the first
/// line of each error in the chain is used.
pub(super) fn describe_error(error: &(dyn std::error::Error + 'static)) -> String {
    let causes: Vec<String> = std::iter::successors(error.source(), |cause| cause.source())
        .filter_map(first_line)
        .collect();
    if causes.is_empty() {
        first_line(error).unwrap_or_default()
    } else {
        causes.join(": ")
    }
}

fn first_line(error: &(dyn std::error::Error + 'static)) -> Option<String> {
    error
        .to_string()
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(ToOwned::to_owned)
}

pub(super) fn rate_limit_error(
    operation: &str,
    source: &octocrab::GitHubError,
    rate_limit: Option<RateLimitInfo>,
) -> GitHubError {
    let base_message = format!("{operation} failed: {message}", message = source.message);
    let message = match &rate_limit {
        Some(info) => format!(
            "{base_message} (resets at {reset})",
            reset = info.reset_description()
        ),
        None => base_message,
    };

    GitHubError::RateLimitExceeded {
        rate_limit,
        message,
    }
}
