//! The export pipeline: date filter → gap fill → resample → smooth → format.

use chrono::{DateTime, Utc};
use klima_core::{
    AggregateMethod, ExportFormat, KlimaError, MissingValuePolicy, Record, Schema, fill_gaps,
    resample, smooth, to_csv, to_json,
};

use crate::interval::Interval;

/// Rows included in [`Export::preview`].
const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, Copy)]
struct FillSpec {
    max_gap_minutes: i64,
    interval_minutes: i64,
}

#[derive(Debug, Clone, Copy)]
struct ResampleSpec {
    interval_minutes: i64,
    method: AggregateMethod,
}

/// A validated, reusable export configuration.
///
/// Stages run in a fixed order regardless of the order builder methods were
/// called: date-range filter, gap fill, resample, smooth, format. Every
/// stage is optional; a `Pipeline` with none of them configured emits the
/// input unchanged in the selected format.
#[derive(Debug, Clone)]
pub struct Pipeline {
    range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    fill: Option<FillSpec>,
    resample: Option<ResampleSpec>,
    fields: Option<Vec<String>>,
    smooth_window: usize,
    format: ExportFormat,
    missing: MissingValuePolicy,
}

/// Builder for a [`Pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    fill: Option<FillSpec>,
    resample: Option<ResampleSpec>,
    fields: Option<Vec<String>>,
    smooth_window: usize,
    format: ExportFormat,
    missing: MissingValuePolicy,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBuilder {
    /// Create a builder with no stages configured: CSV output of the input
    /// records, null-preserving missing-value handling.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            range: None,
            fill: None,
            resample: None,
            fields: None,
            smooth_window: 1,
            format: ExportFormat::Csv,
            missing: MissingValuePolicy::Null,
        }
    }

    /// Keep only records with `start <= ts <= end`.
    #[must_use]
    pub const fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.range = Some((start, end));
        self
    }

    /// Fill gaps up to `max_gap` with one synthesized record per `interval`.
    #[must_use]
    pub const fn fill_gaps(mut self, max_gap: Interval, interval: Interval) -> Self {
        self.fill = Some(FillSpec {
            max_gap_minutes: max_gap.minutes(),
            interval_minutes: interval.minutes(),
        });
        self
    }

    /// Fill gaps with arbitrary minute widths (for cadences the interval
    /// picker does not offer).
    #[must_use]
    pub const fn fill_gaps_minutes(mut self, max_gap_minutes: i64, interval_minutes: i64) -> Self {
        self.fill = Some(FillSpec {
            max_gap_minutes,
            interval_minutes,
        });
        self
    }

    /// Resample into fixed buckets of `interval`, aggregating by `method`.
    #[must_use]
    pub const fn resample(mut self, interval: Interval, method: AggregateMethod) -> Self {
        self.resample = Some(ResampleSpec {
            interval_minutes: interval.minutes(),
            method,
        });
        self
    }

    /// Resample with an arbitrary positive minute width.
    #[must_use]
    pub const fn resample_minutes(mut self, interval_minutes: i64, method: AggregateMethod) -> Self {
        self.resample = Some(ResampleSpec {
            interval_minutes,
            method,
        });
        self
    }

    /// Restrict the output to a subset of fields. Applies both to
    /// aggregation and to the emitted columns/keys.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Apply a centered moving average of `window` records to numeric
    /// fields. `window <= 1` leaves the data untouched.
    #[must_use]
    pub const fn smooth(mut self, window: usize) -> Self {
        self.smooth_window = window;
        self
    }

    /// Select the output encoding.
    #[must_use]
    pub const fn format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Choose what the gap filler emits when neither interpolation endpoint
    /// has a value. Defaults to [`MissingValuePolicy::Null`].
    #[must_use]
    pub const fn missing_policy(mut self, policy: MissingValuePolicy) -> Self {
        self.missing = policy;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns `Err(KlimaError::InvalidArg)` for a non-positive resample or
    /// fill interval, a fill maximum smaller than its interval, or an
    /// inverted date range.
    pub fn build(self) -> Result<Pipeline, KlimaError> {
        if let Some(spec) = &self.resample
            && spec.interval_minutes <= 0
        {
            return Err(KlimaError::invalid_arg(format!(
                "resample interval must be positive, got {}",
                spec.interval_minutes
            )));
        }
        if let Some(spec) = &self.fill {
            if spec.interval_minutes <= 0 {
                return Err(KlimaError::invalid_arg(format!(
                    "fill interval must be positive, got {}",
                    spec.interval_minutes
                )));
            }
            if spec.max_gap_minutes < spec.interval_minutes {
                return Err(KlimaError::invalid_arg(format!(
                    "maximum gap ({} min) is smaller than the fill interval ({} min)",
                    spec.max_gap_minutes, spec.interval_minutes
                )));
            }
        }
        if let Some((start, end)) = self.range
            && start > end
        {
            return Err(KlimaError::invalid_arg(format!(
                "date range starts after it ends: {start} > {end}"
            )));
        }
        Ok(Pipeline {
            range: self.range,
            fill: self.fill,
            resample: self.resample,
            fields: self.fields,
            smooth_window: self.smooth_window,
            format: self.format,
            missing: self.missing,
        })
    }
}

impl Pipeline {
    /// Start building a pipeline.
    #[must_use]
    pub const fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Run the configured stages over `records` and format the result.
    ///
    /// An empty result is not an error: filtering everything out yields an
    /// [`Export`] with `rows == 0` and a header-only (CSV) or `[]` (JSON)
    /// body, so the caller can surface a "no data in range" message.
    ///
    /// # Errors
    /// Returns `Err(KlimaError::Format)` if the output cannot be encoded.
    pub fn run(&self, records: Vec<Record>, schema: &Schema) -> Result<Export, KlimaError> {
        let mut records = records;

        if let Some((start, end)) = self.range {
            records.retain(|r| r.ts >= start && r.ts <= end);
            #[cfg(feature = "tracing")]
            tracing::debug!(rows = records.len(), %start, %end, "filtered date range");
        }
        if let Some(spec) = &self.fill {
            records = fill_gaps(
                records,
                spec.max_gap_minutes,
                spec.interval_minutes,
                schema,
                self.missing,
            );
            #[cfg(feature = "tracing")]
            tracing::debug!(rows = records.len(), "filled gaps");
        }
        if let Some(spec) = &self.resample {
            records = resample(
                records,
                spec.interval_minutes,
                spec.method,
                self.fields.as_deref(),
                schema,
            );
            #[cfg(feature = "tracing")]
            tracing::debug!(rows = records.len(), "resampled");
        }
        if self.smooth_window > 1 {
            records = smooth(&records, self.smooth_window, schema);
        }
        if let Some(fields) = &self.fields {
            for r in &mut records {
                r.values.retain(|k, _| fields.contains(k));
            }
        }

        let headers = self.headers();
        let body = match self.format {
            ExportFormat::Csv => to_csv(&records, headers.as_deref(), schema)?,
            ExportFormat::Json => to_json(&records)?,
        };
        let preview_len = records.len().min(PREVIEW_ROWS);
        let preview = to_csv(&records[..preview_len], headers.as_deref(), schema)?;

        Ok(Export {
            body,
            rows: records.len(),
            format: self.format,
            suffix: self.suffix(),
            preview,
        })
    }

    /// Column list for CSV output: explicit field subsets get exactly those
    /// columns (between `timestamp` and `interpolated`); otherwise the
    /// schema decides.
    fn headers(&self) -> Option<Vec<String>> {
        self.fields.as_ref().map(|fields| {
            let mut cols = Vec::with_capacity(fields.len() + 2);
            cols.push("timestamp".to_string());
            cols.extend(fields.iter().cloned());
            cols.push("interpolated".to_string());
            cols
        })
    }

    /// Processing suffix for export filenames, e.g.
    /// `filled-resampled-15m-mean-smoothed`, or `raw` when no stage is
    /// configured.
    #[must_use]
    pub fn suffix(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if self.fill.is_some() {
            parts.push("filled".to_string());
        }
        if let Some(spec) = &self.resample {
            parts.push(format!(
                "resampled-{}m-{}",
                spec.interval_minutes,
                spec.method.label()
            ));
        }
        if self.smooth_window > 1 {
            parts.push("smoothed".to_string());
        }
        if parts.is_empty() {
            "raw".to_string()
        } else {
            parts.join("-")
        }
    }
}

/// The outcome of a pipeline run.
#[derive(Debug, Clone)]
pub struct Export {
    /// The formatted output, ready to hand to a file-save routine.
    pub body: String,
    /// Number of data rows in the output.
    pub rows: usize,
    /// The encoding of `body`.
    pub format: ExportFormat,
    suffix: String,
    preview: String,
}

impl Export {
    /// A short CSV-rendered preview (header plus the first five rows),
    /// independent of the export format.
    #[must_use]
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Suggested filename: `{station}_{YYYYMMDD-HHMMSS}_{suffix}.{ext}`,
    /// where the suffix encodes the processing applied.
    #[must_use]
    pub fn filename(&self, station: &str, at: DateTime<Utc>) -> String {
        format!(
            "{station}_{}_{}.{}",
            at.format("%Y%m%d-%H%M%S"),
            self.suffix,
            self.format.ext()
        )
    }
}
