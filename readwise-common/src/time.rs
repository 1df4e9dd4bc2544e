//! Timestamp utilities

use chrono::{DateTime, NaiveDateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 (`2024-03-05T14:07:00Z`), RFC 2822 style HTTP dates as
/// emitted by the backend's JSON encoder (`Tue, 05 Mar 2024 14:07:00 GMT`) and
/// naive ISO timestamps without offset, which are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%a, %d %b %Y %H:%M:%S GMT") {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }

    None
}

/// Format a post timestamp as `h:mm AM - Mon D, YYYY`
///
/// Unparseable input is returned unchanged.
///
/// # Examples
///
/// ```
/// use readwise_common::time::format_post_timestamp;
///
/// assert_eq!(format_post_timestamp("2024-03-05T14:07:00Z"), "2:07 PM - Mar 5, 2024");
/// assert_eq!(format_post_timestamp("yesterday"), "yesterday");
/// ```
pub fn format_post_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%-I:%M %p - %b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}
