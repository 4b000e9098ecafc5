//! Timestamp formatting
//!
//! Records carry their timestamps as display strings in the
//! `DD.MM.YYYY HH:mm` form. Values written by other clients may use
//! RFC 3339 or ISO-8601 instead; those are converted when rendered.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;
use std::sync::LazyLock;

/// chrono format string for `DD.MM.YYYY HH:mm`
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

static DISPLAY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}\.\d{2}\.\d{4} \d{2}:\d{2}$").expect("display pattern is a valid regex")
});

/// ISO-8601 date-time layouts without an offset, tried in order
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Format a date-time as `DD.MM.YYYY HH:mm`
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(DISPLAY_FORMAT).to_string()
}

/// Current local time as `DD.MM.YYYY HH:mm`
pub fn now_timestamp() -> String {
    format_timestamp(&Local::now())
}

/// Check if a string is already in `DD.MM.YYYY HH:mm` form
pub fn is_display_formatted(raw: &str) -> bool {
    DISPLAY_PATTERN.is_match(raw)
}

/// Render a stored date value for display.
///
/// Already-formatted values pass through, RFC 3339 values are shown in
/// local time, naive date-times as-is and bare dates at midnight. Anything
/// unparsable is returned verbatim.
pub fn display_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_display_formatted(trimmed) {
        return trimmed.to_string();
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return format_timestamp(&at.with_timezone(&Local));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return naive.format(DISPLAY_FORMAT).to_string();
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return midnight.format(DISPLAY_FORMAT).to_string();
        }
    }

    raw.to_string()
}

// ============================================================================
// Tests
// ============================================================================
