//! Common utilities shared across modules.

use chrono::{DateTime, Local, SecondsFormat, Utc};

/// `2024-05-01T09:30:00.000Z` style timestamp used in the history log.
pub fn iso8601(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Local calendar date, `month/day/year` without zero padding.
pub fn local_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
}
