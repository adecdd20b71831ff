//! klima-core
//!
//! Record model, timestamp parsing, and time-series transformations shared
//! across the klima ecosystem.
//!
//! - `record`: the observation model (`Record`, `Value`) and the `Schema`
//!   describing which fields are numeric vs categorical.
//! - `timestamp`: total parsing of the two timestamp formats the station
//!   loggers produce.
//! - `timeseries`: resampling, gap filling, smoothing, and cadence
//!   inference; all pure functions over owned/borrowed sequences.
//! - `export`: CSV/JSON serialization and the consistent-interval grid
//!   generator.
//!
//! Everything in this crate is single-threaded, synchronous, and free of
//! I/O; each transformation returns a new sequence and never mutates its
//! input, so any stage can be re-run safely.
#![warn(missing_docs)]

mod error;
/// CSV/JSON serialization and grid-aligned export helpers.
pub mod export;
/// The record/value/schema data model.
pub mod record;
/// Total timestamp parsing and canonical formatting.
pub mod timestamp;
/// Resampling, gap filling, smoothing, and cadence inference.
pub mod timeseries;
/// Configuration enums for the transformations and exporters.
pub mod types;

pub use error::KlimaError;
pub use export::{consistent_intervals, to_csv, to_json};
pub use record::{FieldDef, FieldKind, Record, Schema, Value, parse_records};
pub use timestamp::{format_timestamp, parse_timestamp};
pub use timeseries::fill::{fill_gaps, interpolate_between};
pub use timeseries::infer::{estimate_step_seconds, has_gaps};
pub use timeseries::resample::resample;
pub use timeseries::smooth::smooth;
pub use types::{AggregateMethod, ExportFormat, MissingValuePolicy};
