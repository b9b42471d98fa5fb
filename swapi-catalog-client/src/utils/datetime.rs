//! 日期时间工具
//!
//! The upstream API encodes `created`/`edited` as RFC 3339 strings
//! (`2014-12-09T13:50:51.644000Z`). These helpers parse them and render
//! the short form shown in detail views.

use chrono::{DateTime, Utc};

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Render a timestamp as `"Dec 9, 2014"`, or `"Unknown"` when it cannot be parsed.
pub fn format_date(value: &str) -> String {
    parse_timestamp(value).map_or_else(
        || "Unknown".to_string(),
        |dt| dt.format("%b %-d, %Y").to_string(),
    )
}
