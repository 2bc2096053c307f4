//! Date/time display helpers.
//!
//! The store writes UTC timestamps as `YYYY-MM-DD HH:MM:SS`; pages show them
//! in the configured timezone.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Default display format for post timestamps.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format a stored UTC timestamp in the given timezone.
///
/// Accepts RFC 3339 or SQLite `datetime('now')` output. Returns the input
/// unchanged if either the timestamp or the timezone cannot be parsed.
pub fn format_datetime(datetime_str: &str, timezone: &str, format: &str) -> String {
    let tz: Tz = match timezone.parse() {
        Ok(tz) => tz,
        Err(_) => return datetime_str.to_string(),
    };

    let utc = if let Ok(dt) = DateTime::parse_from_rfc3339(datetime_str) {
        dt.with_timezone(&Utc)
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S") {
        naive.and_utc()
    } else {
        return datetime_str.to_string();
    };

    utc.with_timezone(&tz).format(format).to_string()
}

/// Format a stored timestamp with [`DISPLAY_FORMAT`].
pub fn format_for_display(datetime_str: &str, timezone: &str) -> String {
    format_datetime(datetime_str, timezone, DISPLAY_FORMAT)
}
