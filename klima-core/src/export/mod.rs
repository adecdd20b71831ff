//! Serialization of record sequences to CSV and JSON, plus the
//! consistent-interval row generator used for grid-aligned exports.
/// Consistent-interval row generation over a fixed time grid.
pub mod consistent;
/// Flat tabular CSV output.
pub mod csv;
/// Pretty-printed JSON output.
pub mod json;

pub use consistent::consistent_intervals;
pub use csv::to_csv;
pub use json::to_json;
