//! Configuration enums shared by the transformations and the export pipeline.

use serde::{Deserialize, Serialize};

/// How values inside a resampling bucket are combined into one output value.
///
/// For categorical fields, `Mean`, `Max`, and `Min` have no arithmetic
/// meaning and degrade to the bucket mode (most frequent value); `First` and
/// `Last` behave as named for both kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateMethod {
    /// Arithmetic mean of the numeric values in the bucket.
    #[default]
    Mean,
    /// Earliest value in the bucket.
    First,
    /// Latest value in the bucket.
    Last,
    /// Largest numeric value in the bucket.
    Max,
    /// Smallest numeric value in the bucket.
    Min,
}

impl AggregateMethod {
    /// Short lowercase label used in export filenames (`mean`, `max`, ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::First => "first",
            Self::Last => "last",
            Self::Max => "max",
            Self::Min => "min",
        }
    }
}

/// What the gap filler emits when neither interpolation endpoint has a
/// defined value for a field.
///
/// The legacy dashboard silently wrote `0` (numeric) or `""` (categorical),
/// which fabricates plausible-looking sensor readings. `Null` is the default
/// here; `Zero` exists only for byte-compatible exports against the old
/// system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingValuePolicy {
    /// Emit an explicit null (renders as an empty CSV cell / JSON `null`).
    #[default]
    Null,
    /// Emit `0` for numeric fields and the empty string for categorical ones.
    Zero,
}

/// Output encoding for an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Flat tabular CSV with a header row.
    #[default]
    Csv,
    /// Pretty-printed JSON array of flat objects.
    Json,
}

impl ExportFormat {
    /// File extension for this format, without the leading dot.
    #[must_use]
    pub const fn ext(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}
