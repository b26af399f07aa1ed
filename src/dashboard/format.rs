//! Display Formatting
//!
//! Text shown on the page: timestamps, counters and percentages.

use chrono::{DateTime, Local, NaiveDateTime};

/// Medium date, short time (`Oct 16, 2026, 3:04 PM`)
const LAST_UPDATED_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

/// Naive layouts the upstream has been seen to send
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse the upstream `last_updated` field.
///
/// Timestamps with an offset are shifted to local time; naive timestamps are
/// already local to the upstream and taken as-is.
pub fn parse_last_updated(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Format `last_updated` for display, falling back to the raw text
pub fn format_last_updated(raw: &str) -> String {
    match parse_last_updated(raw) {
        Some(dt) => dt.format(LAST_UPDATED_FORMAT).to_string(),
        None => {
            tracing::warn!("Unparseable last_updated timestamp: {:?}", raw);
            raw.to_string()
        }
    }
}

/// Thousands-separated integer (`12,345`)
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Rounded percentage label (`70%`)
pub fn format_percent_label(percent: f64) -> String {
    format!("{}%", percent.round() as i64)
}

/// Unrounded CSS width (`33.333333333333336%`)
pub fn format_width(percent: f64) -> String {
    format!("{}%", percent)
}
