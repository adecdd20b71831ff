//! klima turns raw microclimate sensor readings into clean, regular,
//! export-ready time series.
//!
//! Overview
//! - Parses timestamped records from API payloads (`klima_core::parse_records`).
//! - Composes the transformation stages in a fixed, predictable order:
//!   date-range filter → gap fill → resample → smooth → format.
//! - Every stage is a pure function from `klima-core`; the pipeline only
//!   sequences them and validates the configuration up front.
//!
//! Key behaviors and trade-offs
//! - Gap filling synthesizes records only across gaps up to a configured
//!   maximum; longer spans are treated as genuine outages and left open.
//!   Synthesized records are flagged `interpolated` end to end so consumers
//!   can tell actual from estimated data.
//! - Resampling aggregates into half-open fixed buckets and never fabricates
//!   buckets for empty ranges; combine with gap filling when a fully regular
//!   grid is wanted.
//! - When neither interpolation endpoint has a value the default is an
//!   explicit null; the legacy dashboard fabricated zeros, available behind
//!   [`MissingValuePolicy::Zero`] for byte-compatible exports only.
//!
//! Example
//! ```
//! use klima::{AggregateMethod, ExportFormat, Interval, Pipeline, Schema};
//! use klima_core::parse_records;
//!
//! # fn main() -> Result<(), klima::KlimaError> {
//! let records = parse_records(
//!     r#"[{"timestamp": "2025-01-01T00:00:00Z", "humidity": 40},
//!         {"timestamp": "2025-01-01T00:10:00Z", "humidity": 60}]"#,
//! )?;
//! let schema = Schema::new().numeric("humidity");
//!
//! let pipeline = Pipeline::builder()
//!     .resample(Interval::M15, AggregateMethod::Mean)
//!     .format(ExportFormat::Csv)
//!     .build()?;
//! let export = pipeline.run(records, &schema)?;
//! assert_eq!(export.rows, 1);
//! assert!(export.body.contains("50"));
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

/// Selectable bucket widths.
mod interval;
/// Pipeline composition and export output.
mod pipeline;

pub use interval::Interval;
pub use pipeline::{Export, Pipeline, PipelineBuilder};

// Re-export core types for convenience
pub use klima_core::{
    AggregateMethod, ExportFormat, FieldDef, FieldKind, KlimaError, MissingValuePolicy, Record,
    Schema, Value, consistent_intervals, estimate_step_seconds, fill_gaps, format_timestamp,
    has_gaps, parse_records, parse_timestamp, resample, smooth, to_csv, to_json,
};
