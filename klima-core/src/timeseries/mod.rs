//! Time-series transformations applied before export.
//!
//! Modules include:
//! - `infer`: estimate the native cadence of a series and detect gaps
//! - `fill`: synthesize interpolated records across short outages
//! - `resample`: bucket irregular readings into a fixed interval
//! - `smooth`: centered moving average over numeric fields
//!
//! Every function here is a pure, total transformation: any input sequence
//! (including empty) yields a well-formed output sequence, and inputs are
//! never mutated in place.
/// Cadence estimation and gap detection helpers.
pub mod infer;
/// Gap detection and interpolation across short outages.
pub mod fill;
/// Resampling of irregular readings into fixed-width buckets.
pub mod resample;
/// Moving-average smoothing over numeric fields.
pub mod smooth;
