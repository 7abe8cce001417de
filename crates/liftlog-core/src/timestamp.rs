//! Canonical calendar timestamps.
//!
//! Every boundary of the engine exchanges `YYYY-MM-DD HH:mm:ss` in local time,
//! zero-padded. Older journal entries may carry other shapes (`T` separator,
//! fractional seconds, an RFC 3339 offset, a bare date); [`normalize_timestamp`]
//! folds those into the canonical form.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// `chrono` format string of the canonical timestamp.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `chrono` format string of a calendar day.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_LEN: usize = 10;

const LENIENT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Formats a date-time in the canonical representation.
pub fn format_canonical(value: NaiveDateTime) -> String {
    value.format(CANONICAL_FORMAT).to_string()
}

/// Returns true if `raw` is already a canonical timestamp.
pub fn is_canonical(raw: &str) -> bool {
    raw.len() == 19 && NaiveDateTime::parse_from_str(raw, CANONICAL_FORMAT).is_ok()
}

/// Parses any accepted timestamp shape.
///
/// RFC 3339 values keep the wall-clock time as written; the offset is dropped
/// rather than converted, so the calendar day never shifts.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(value) = NaiveDateTime::parse_from_str(raw, CANONICAL_FORMAT) {
        return Some(value);
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.naive_local());
    }
    for format in LENIENT_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(value);
        }
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Rewrites a timestamp into the canonical form.
///
/// Returns `None` when the input cannot be understood; callers keep such
/// values untouched.
pub fn normalize_timestamp(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(format_canonical)
}

/// Truncates a timestamp to its `YYYY-MM-DD` component.
pub fn date_only(timestamp: &str) -> &str {
    timestamp.get(..DATE_LEN).unwrap_or(timestamp)
}

/// Parses a `YYYY-MM-DD` calendar day.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Computes the save date used when a session is first touched.
///
/// An explicit target day wins over today's date; the time of day always
/// comes from `now`.
pub fn save_date_for(target: Option<NaiveDate>, now: NaiveDateTime) -> String {
    let value = match target {
        Some(date) => date.and_time(now.time()),
        None => now,
    };
    format_canonical(value)
}
