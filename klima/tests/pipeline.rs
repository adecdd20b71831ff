use chrono::{DateTime, Utc};
use klima::{
    AggregateMethod, ExportFormat, Interval, MissingValuePolicy, Pipeline, Record, Schema,
};

fn t(min: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_735_689_600 + min * 60, 0).unwrap() // 2025-01-01T00:00:00Z
}

fn schema() -> Schema {
    Schema::new()
        .numeric_with_unit("temperature", "°C")
        .numeric_with_unit("humidity", "%")
        .categorical("wind_dir")
}

/// A morning of ten-minute station readings with one 40 minute hole.
fn fixture() -> Vec<Record> {
    let mut records = Vec::new();
    for (min, temp, hum, dir) in [
        (0, 18.0, 72.0, "N"),
        (10, 18.4, 71.0, "N"),
        (20, 18.9, 70.5, "NE"),
        (60, 21.0, 64.0, "E"),
        (70, 21.6, 63.0, "E"),
        (80, 22.1, 61.5, "SE"),
    ] {
        records.push(
            Record::new(t(min))
                .with_value("temperature", temp)
                .with_value("humidity", hum)
                .with_value("wind_dir", dir),
        );
    }
    records
}

#[test]
fn full_pipeline_fills_resamples_smooths_and_formats() {
    let pipeline = Pipeline::builder()
        .fill_gaps(Interval::H1, Interval::M5)
        .resample(Interval::M15, AggregateMethod::Mean)
        .smooth(3)
        .format(ExportFormat::Csv)
        .build()
        .unwrap();
    let export = pipeline.run(fixture(), &schema()).unwrap();

    // 0..=80 minutes on a filled 15 minute grid: buckets 0,15,30,45,60,75.
    assert_eq!(export.rows, 6);
    let mut lines = export.body.lines();
    assert_eq!(
        lines.next().unwrap(),
        "timestamp,temperature,humidity,wind_dir,interpolated"
    );
    assert_eq!(export.body.lines().count(), 7);
}

#[test]
fn date_range_filter_is_inclusive() {
    let pipeline = Pipeline::builder()
        .between(t(10), t(60))
        .build()
        .unwrap();
    let export = pipeline.run(fixture(), &schema()).unwrap();
    assert_eq!(export.rows, 3);
}

#[test]
fn empty_result_is_not_an_error() {
    let pipeline = Pipeline::builder()
        .between(t(500), t(600))
        .build()
        .unwrap();
    let export = pipeline.run(fixture(), &schema()).unwrap();
    assert_eq!(export.rows, 0);
    // Header-only body, usable as-is by the caller.
    assert_eq!(export.body.lines().count(), 1);

    let json = Pipeline::builder()
        .between(t(500), t(600))
        .format(ExportFormat::Json)
        .build()
        .unwrap()
        .run(fixture(), &schema())
        .unwrap();
    assert_eq!(json.body.trim(), "[]");
}

#[test]
fn field_subset_limits_columns() {
    let pipeline = Pipeline::builder()
        .resample(Interval::M15, AggregateMethod::Mean)
        .fields(["humidity"])
        .build()
        .unwrap();
    let export = pipeline.run(fixture(), &schema()).unwrap();
    assert_eq!(
        export.body.lines().next().unwrap(),
        "timestamp,humidity,interpolated"
    );
    assert!(!export.body.contains("wind_dir"));
}

#[test]
fn preview_shows_at_most_five_rows_as_csv() {
    let pipeline = Pipeline::builder().build().unwrap();
    let export = pipeline.run(fixture(), &schema()).unwrap();
    assert_eq!(export.rows, 6);
    assert_eq!(export.preview().lines().count(), 6); // header + 5 rows

    let json = Pipeline::builder()
        .format(ExportFormat::Json)
        .build()
        .unwrap()
        .run(fixture(), &schema())
        .unwrap();
    // Preview stays tabular regardless of the export format.
    assert!(json.preview().starts_with("timestamp,"));
}

#[test]
fn filename_encodes_station_time_and_processing() {
    let pipeline = Pipeline::builder()
        .fill_gaps(Interval::H1, Interval::M5)
        .resample(Interval::M15, AggregateMethod::Mean)
        .smooth(3)
        .build()
        .unwrap();
    let export = pipeline.run(fixture(), &schema()).unwrap();
    assert_eq!(
        export.filename("garden-north", t(0)),
        "garden-north_20250101-000000_filled-resampled-15m-mean-smoothed.csv"
    );

    let raw = Pipeline::builder()
        .format(ExportFormat::Json)
        .build()
        .unwrap()
        .run(fixture(), &schema())
        .unwrap();
    assert_eq!(
        raw.filename("garden-north", t(0)),
        "garden-north_20250101-000000_raw.json"
    );
}

#[test]
fn interpolated_rows_are_flagged_in_the_output() {
    let pipeline = Pipeline::builder()
        .fill_gaps_minutes(60, 10)
        .format(ExportFormat::Csv)
        .build()
        .unwrap();
    let export = pipeline.run(fixture(), &schema()).unwrap();
    // The 20 -> 60 minute hole gains three ten-minute rows, flagged true.
    assert_eq!(export.rows, 9);
    let flagged = export
        .body
        .lines()
        .skip(1)
        .filter(|l| l.ends_with(",true"))
        .count();
    assert_eq!(flagged, 3);
}

#[test]
fn builder_rejects_bad_arguments() {
    assert!(
        Pipeline::builder()
            .resample_minutes(0, AggregateMethod::Mean)
            .build()
            .is_err()
    );
    assert!(
        Pipeline::builder()
            .fill_gaps_minutes(5, 15)
            .build()
            .is_err()
    );
    assert!(Pipeline::builder().between(t(10), t(0)).build().is_err());
}

#[test]
fn interval_labels_round_trip() {
    for interval in Interval::ALL {
        assert_eq!(interval.label().parse::<Interval>().unwrap(), interval);
        assert_eq!(Interval::try_from(interval.minutes()).unwrap(), interval);
    }
    assert!("7m".parse::<Interval>().is_err());
    assert!(Interval::try_from(7i64).is_err());
}

#[test]
fn zero_policy_is_threaded_through_to_the_filler() {
    let records = vec![
        Record::new(t(0)).with_value("temperature", klima::Value::Null),
        Record::new(t(20)).with_value("temperature", klima::Value::Null),
    ];
    let pipeline = Pipeline::builder()
        .fill_gaps_minutes(60, 10)
        .missing_policy(MissingValuePolicy::Zero)
        .format(ExportFormat::Json)
        .build()
        .unwrap();
    let export = pipeline.run(records, &schema()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&export.body).unwrap();
    assert_eq!(parsed[1]["temperature"], 0.0);
    assert_eq!(parsed[1]["interpolated"], true);
}
