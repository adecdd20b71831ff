use chrono::{Datelike, Timelike};
use klima_core::{format_timestamp, parse_timestamp};

#[test]
fn rfc3339_with_offset_normalizes_to_utc() {
    let ts = parse_timestamp("2025-03-05T14:30:00+07:00").unwrap();
    assert_eq!(ts.hour(), 7);
    assert_eq!(format_timestamp(ts), "2025-03-05T07:30:00Z");
}

#[test]
fn naive_iso_is_treated_as_utc() {
    let ts = parse_timestamp("2025-03-05T14:30:00").unwrap();
    assert_eq!(format_timestamp(ts), "2025-03-05T14:30:00Z");
}

#[test]
fn logger_format_parses_day_first() {
    let ts = parse_timestamp("05-03-25 14:30:00").unwrap();
    assert_eq!((ts.year(), ts.month(), ts.day()), (2025, 3, 5));
    assert_eq!((ts.hour(), ts.minute(), ts.second()), (14, 30, 0));
}

#[test]
fn two_digit_years_map_into_the_2000s() {
    assert_eq!(parse_timestamp("01-01-00 00:00:00").unwrap().year(), 2000);
    assert_eq!(parse_timestamp("01-01-68 00:00:00").unwrap().year(), 2068);
    assert_eq!(parse_timestamp("01-01-69 00:00:00").unwrap().year(), 2069);
    assert_eq!(parse_timestamp("31-12-99 23:59:59").unwrap().year(), 2099);
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    assert!(parse_timestamp("  2025-03-05T14:30:00Z\n").is_some());
}

#[test]
fn invalid_inputs_yield_the_sentinel() {
    for bad in [
        "",
        "not a date",
        "32-01-25 00:00:00",
        "01-13-25 00:00:00",
        "2025-03-05 14:30:00 extra",
        "05/03/25 14:30:00",
        "2025-02-30T00:00:00Z",
    ] {
        assert!(parse_timestamp(bad).is_none(), "accepted {bad:?}");
    }
}

#[test]
fn round_trips_through_the_canonical_form() {
    let ts = parse_timestamp("2025-01-01T00:10:00Z").unwrap();
    assert_eq!(parse_timestamp(&format_timestamp(ts)), Some(ts));
}
