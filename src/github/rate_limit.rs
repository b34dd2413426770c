//! Rate limit snapshot fetched after GitHub refuses a request.

use chrono::{DateTime, Utc};

/// Rate limit state reported by the `/rate_limit` endpoint.
///
/// # Example
///
/// ```
/// use pullwright::github::rate_limit::RateLimitInfo;
///
/// let info = RateLimitInfo::new(5000, 0, 1_700_000_000);
/// assert!(info.is_exhausted());
/// assert_eq!(info.reset_at(), 1_700_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    limit: u32,
    remaining: u32,
    reset_at: u64,
}

impl RateLimitInfo {
    /// Creates a new rate limit snapshot.
    #[must_use]
    pub const fn new(limit: u32, remaining: u32, reset_at: u64) -> Self {
        Self {
            limit,
            remaining,
            reset_at,
        }
    }

    /// Maximum requests allowed in the current window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Remaining requests in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Unix timestamp when the window resets.
    #[must_use]
    pub const fn reset_at(&self) -> u64 {
        self.reset_at
    }

    /// Returns true when no requests remain.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Reset time rendered as an RFC 3339 timestamp, falling back to the raw
    /// Unix value when it does not fit a calendar date.
    #[must_use]
    pub fn reset_description(&self) -> String {
        i64::try_from(self.reset_at)
            .ok()
            .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0))
            .map_or_else(
                || self.reset_at.to_string(),
                |reset| format!("{} ({})", reset.to_rfc3339(), self.reset_at),
            )
    }
}
