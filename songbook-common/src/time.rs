//! Timestamp utilities

use chrono::{DateTime, SecondsFormat, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a timestamp the way it is stored in the database.
///
/// Millisecond precision with a `Z` suffix, so lexical order equals
/// chronological order.
pub fn to_db(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time in database format
pub fn now_db() -> String {
    to_db(now())
}

/// Render a stored timestamp for display, e.g. `March 3, 2024`.
///
/// Falls back to the raw string if it does not parse.
pub fn display_date(stored: &str) -> String {
    match DateTime::parse_from_rfc3339(stored) {
        Ok(ts) => ts.format("%B %-d, %Y").to_string(),
        Err(_) => stored.to_string(),
    }
}
