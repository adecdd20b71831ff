//! Timestamp parsing for the heterogeneous formats produced by the station
//! loggers.
//!
//! Two representations occur in the wild: ISO-8601 / RFC 3339 (the REST
//! endpoints) and the logger-native `DD-MM-YY HH:mm:ss` with a two-digit
//! year. Both are normalized to UTC instants. Parsing is total: anything
//! unrecognizable maps to `None`, the invalid sentinel, so callers can filter
//! bad rows instead of handling errors.

use chrono::{DateTime, Datelike, NaiveDateTime, SecondsFormat, Utc};

/// Logger-native layout, e.g. `05-03-25 14:30:00`.
const LOGGER_FORMAT: &str = "%d-%m-%y %H:%M:%S";

/// ISO-8601 without an offset, e.g. `2025-03-05T14:30:00`; treated as UTC.
const NAIVE_ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a timestamp string into a UTC instant.
///
/// Accepted inputs, tried in order:
/// 1. RFC 3339 / ISO-8601 with an offset (`2025-03-05T14:30:00Z`).
/// 2. ISO-8601 without an offset, interpreted as UTC.
/// 3. `DD-MM-YY HH:mm:ss`, the station logger format. The two-digit year is
///    mapped into 2000-2099 (`25` -> 2025, `99` -> 2099).
///
/// Returns `None` for anything else, including syntactically valid but
/// out-of-range dates. Never panics.
///
/// ```
/// use klima_core::timestamp::parse_timestamp;
///
/// let iso = parse_timestamp("2025-01-01T00:10:00Z").unwrap();
/// let logger = parse_timestamp("01-01-25 00:10:00").unwrap();
/// assert_eq!(iso, logger);
/// assert!(parse_timestamp("not a date").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, NAIVE_ISO_FORMAT) {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, LOGGER_FORMAT) {
        // chrono resolves %y into 1969-2068; the loggers mean 2000-2099.
        let adjusted = if naive.year() < 2000 {
            naive.with_year(naive.year() + 100)?
        } else {
            naive
        };
        return Some(adjusted.and_utc());
    }
    None
}

/// Render a UTC instant in the canonical RFC 3339 form used by the exporters
/// (`2025-03-05T14:30:00Z`).
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
