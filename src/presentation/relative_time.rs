//! Human-readable ages such as `3 days ago`.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

const UNITS: [(i64, &str); 5] = [
    (YEAR, "year"),
    (MONTH, "month"),
    (DAY, "day"),
    (HOUR, "hour"),
    (MINUTE, "minute"),
];

/// Describes how long before `now` the instant `then` was.
///
/// Uses the largest whole unit; anything under a minute, or in the future,
/// is `just now`.
#[must_use]
pub fn describe_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then).num_seconds();
    UNITS
        .iter()
        .find_map(|&(unit, name)| {
            let count = elapsed.checked_div(unit)?;
            (count >= 1).then(|| ago(count, name))
        })
        .unwrap_or_else(|| "just now".to_owned())
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
