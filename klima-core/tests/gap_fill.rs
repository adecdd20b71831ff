use chrono::{DateTime, Utc};
use klima_core::{MissingValuePolicy, Record, Schema, Value, fill_gaps};

fn t(min: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(min * 60, 0).unwrap()
}

fn schema() -> Schema {
    Schema::new().numeric("temperature").categorical("wind_dir")
}

fn reading(min: i64, temperature: f64) -> Record {
    Record::new(t(min)).with_value("temperature", temperature)
}

#[test]
fn hour_gap_at_five_minutes_yields_eleven_interior_records() {
    let records = vec![reading(0, 10.0), reading(60, 22.0)];
    let out = fill_gaps(records, 120, 5, &schema(), MissingValuePolicy::Null);

    assert_eq!(out.len(), 13);
    let synthesized: Vec<&Record> = out.iter().filter(|r| r.interpolated).collect();
    assert_eq!(synthesized.len(), 11);
    for (j, r) in synthesized.iter().enumerate() {
        assert_eq!(r.ts, t(5 * (j as i64 + 1)));
    }
    // Midpoint of a linear field equals the mean of the endpoints.
    let midpoint = out.iter().find(|r| r.ts == t(30)).unwrap();
    assert_eq!(midpoint.number("temperature"), Some(16.0));
}

#[test]
fn gap_beyond_maximum_is_left_unfilled() {
    let records = vec![reading(0, 10.0), reading(200, 22.0)];
    let out = fill_gaps(records.clone(), 120, 5, &schema(), MissingValuePolicy::Null);
    assert_eq!(out, records);
}

#[test]
fn gap_equal_to_interval_is_not_a_gap() {
    let records = vec![reading(0, 10.0), reading(5, 12.0)];
    let out = fill_gaps(records.clone(), 120, 5, &schema(), MissingValuePolicy::Null);
    assert_eq!(out, records);
}

#[test]
fn categorical_fields_take_the_nearer_endpoint() {
    let records = vec![
        Record::new(t(0)).with_value("wind_dir", "N"),
        Record::new(t(60)).with_value("wind_dir", "S"),
    ];
    let out = fill_gaps(records, 120, 5, &schema(), MissingValuePolicy::Null);
    for r in out.iter().filter(|r| r.interpolated) {
        let minutes = (r.ts.timestamp() / 60) as f64;
        let expected = if minutes / 60.0 < 0.5 { "N" } else { "S" };
        assert_eq!(r.get("wind_dir").as_text(), Some(expected));
    }
}

#[test]
fn single_defined_endpoint_is_copied() {
    let records = vec![
        Record::new(t(0)).with_value("temperature", 10.0),
        Record::new(t(20)).with_value("temperature", Value::Null),
    ];
    let out = fill_gaps(records, 120, 10, &schema(), MissingValuePolicy::Null);
    let synth = out.iter().find(|r| r.interpolated).unwrap();
    assert_eq!(synth.number("temperature"), Some(10.0));
}

#[test]
fn missing_both_endpoints_defaults_to_null() {
    let records = vec![
        Record::new(t(0)).with_value("temperature", Value::Null),
        Record::new(t(20)).with_value("temperature", Value::Null),
    ];
    let out = fill_gaps(records, 120, 10, &schema(), MissingValuePolicy::Null);
    let synth = out.iter().find(|r| r.interpolated).unwrap();
    assert_eq!(*synth.get("temperature"), Value::Null);
}

#[test]
fn legacy_zero_policy_fabricates_zero() {
    let records = vec![
        Record::new(t(0)).with_value("temperature", Value::Null),
        Record::new(t(20)).with_value("temperature", Value::Null),
    ];
    let out = fill_gaps(records, 120, 10, &schema(), MissingValuePolicy::Zero);
    let synth = out.iter().find(|r| r.interpolated).unwrap();
    assert_eq!(synth.number("temperature"), Some(0.0));
}

#[test]
fn unsorted_input_is_sorted_defensively() {
    let records = vec![reading(60, 22.0), reading(0, 10.0)];
    let out = fill_gaps(records, 120, 5, &schema(), MissingValuePolicy::Null);
    assert_eq!(out.len(), 13);
    for pair in out.windows(2) {
        assert!(pair[0].ts < pair[1].ts);
    }
}

#[test]
fn synthesized_records_cover_union_of_endpoint_fields() {
    let records = vec![
        Record::new(t(0)).with_value("temperature", 10.0),
        Record::new(t(20)).with_value("humidity", 55.0),
    ];
    let out = fill_gaps(records, 120, 10, &schema(), MissingValuePolicy::Null);
    let synth = out.iter().find(|r| r.interpolated).unwrap();
    assert_eq!(synth.number("temperature"), Some(10.0));
    assert_eq!(synth.number("humidity"), Some(55.0));
}

#[test]
fn non_positive_parameters_return_input_unchanged() {
    let records = vec![reading(0, 10.0), reading(60, 22.0)];
    assert_eq!(
        fill_gaps(records.clone(), 0, 5, &schema(), MissingValuePolicy::Null),
        records
    );
    assert_eq!(
        fill_gaps(records.clone(), 120, 0, &schema(), MissingValuePolicy::Null),
        records
    );
}
