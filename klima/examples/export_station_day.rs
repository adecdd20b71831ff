//! Export a day of station readings as resampled, gap-filled CSV.
//!
//! Run with `cargo run --example export_station_day`.

use chrono::{TimeDelta, Utc};
use klima::{AggregateMethod, ExportFormat, Interval, Pipeline, Record, Schema};

fn main() -> Result<(), klima::KlimaError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let schema = Schema::new()
        .numeric_with_unit("temperature", "°C")
        .numeric_with_unit("humidity", "%")
        .numeric_with_unit("rainfall", "mm")
        .categorical("wind_dir");

    // Simulated readings: one per ten minutes with a mid-morning outage.
    let start = Utc::now() - TimeDelta::hours(6);
    let mut records = Vec::new();
    for i in 0i64..36 {
        if (12..16).contains(&i) {
            continue; // 40 minute outage
        }
        let minutes = i * 10;
        records.push(
            Record::new(start + TimeDelta::minutes(minutes))
                .with_value("temperature", 18.0 + i as f64 * 0.2)
                .with_value("humidity", 75.0 - i as f64 * 0.4)
                .with_value("rainfall", 0.0)
                .with_value("wind_dir", if i % 2 == 0 { "N" } else { "NE" }),
        );
    }

    let pipeline = Pipeline::builder()
        .fill_gaps(Interval::H1, Interval::M5)
        .resample(Interval::M30, AggregateMethod::Mean)
        .smooth(3)
        .format(ExportFormat::Csv)
        .build()?;

    let export = pipeline.run(records, &schema)?;
    println!("{} rows -> {}", export.rows, export.filename("demo-station", Utc::now()));
    println!("{}", export.preview());
    Ok(())
}
