//! Gap detection and interpolation across short sensor outages.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};

use crate::record::{FieldKind, Record, Schema, Value};
use crate::types::MissingValuePolicy;

/// Synthesize interpolated records across gaps no longer than
/// `max_gap_minutes`, one every `interval_minutes`.
///
/// For each adjacent pair of records with `interval < delta <= max_gap`,
/// `floor(delta / interval) - 1` records are emitted at
/// `earlier.ts + j * interval` for `j = 1..`, each valued at position ratio
/// `j / (gap_count + 1)`:
/// - numeric fields interpolate linearly between the endpoints;
/// - categorical fields take the earlier value below ratio 0.5, the later
///   value at or above it;
/// - when only one endpoint has a defined value, that value is copied;
/// - when neither endpoint does, `missing` decides between an explicit null
///   (default) and the legacy zero/empty-string fallback.
///
/// A delta above `max_gap` is treated as a genuine outage and left unfilled.
/// Every synthesized record carries `interpolated = true`. The input is
/// sorted defensively and the output is ascending by timestamp.
///
/// Guardrails: fewer than two records, `interval_minutes <= 0`, or
/// `max_gap_minutes <= 0` returns the input unchanged.
///
/// ```
/// use klima_core::timeseries::fill::fill_gaps;
/// use klima_core::{MissingValuePolicy, Record, Schema};
/// use klima_core::timestamp::parse_timestamp;
///
/// let schema = Schema::new().numeric("temperature");
/// let records = vec![
///     Record::new(parse_timestamp("2025-01-01T00:00:00Z").unwrap()).with_value("temperature", 10.0),
///     Record::new(parse_timestamp("2025-01-01T01:00:00Z").unwrap()).with_value("temperature", 22.0),
/// ];
/// let out = fill_gaps(records, 120, 5, &schema, MissingValuePolicy::Null);
/// // 2 real records + floor(60 / 5) - 1 = 11 synthesized ones.
/// assert_eq!(out.len(), 13);
/// assert!(out[6].interpolated);
/// // Midpoint of a linear field is the mean of the endpoints.
/// assert_eq!(out[6].number("temperature"), Some(16.0));
/// ```
#[must_use]
pub fn fill_gaps(
    mut records: Vec<Record>,
    max_gap_minutes: i64,
    interval_minutes: i64,
    schema: &Schema,
    missing: MissingValuePolicy,
) -> Vec<Record> {
    if records.len() < 2 || interval_minutes <= 0 || max_gap_minutes <= 0 {
        return records;
    }
    let step_ms = interval_minutes * 60_000;
    let max_gap_ms = max_gap_minutes * 60_000;

    records.sort_by_key(|r| r.ts);

    let mut out: Vec<Record> = Vec::with_capacity(records.len());
    for pair in records.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        out.push(a.clone());

        let delta_ms = (b.ts - a.ts).num_milliseconds();
        if delta_ms <= step_ms {
            continue;
        }
        if delta_ms > max_gap_ms {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                from = %a.ts,
                to = %b.ts,
                gap_minutes = delta_ms / 60_000,
                "gap exceeds maximum, treating as outage"
            );
            continue;
        }

        let gap_count = delta_ms / step_ms - 1;
        for j in 1..=gap_count {
            let ts = a.ts + TimeDelta::milliseconds(j * step_ms);
            let ratio = j as f64 / (gap_count + 1) as f64;
            out.push(interpolate_between(a, b, ts, ratio, schema, missing));
        }
    }
    if let Some(last) = records.last() {
        out.push(last.clone());
    }

    out.sort_by_key(|r| r.ts);
    out
}

/// Build one synthetic record between two real ones at position `ratio`
/// (0 at `a`, 1 at `b`).
///
/// Shared by [`fill_gaps`] and the consistent-interval exporter. The result
/// carries the union of both endpoints' fields and is always flagged
/// `interpolated`.
#[must_use]
pub fn interpolate_between(
    a: &Record,
    b: &Record,
    ts: DateTime<Utc>,
    ratio: f64,
    schema: &Schema,
    missing: MissingValuePolicy,
) -> Record {
    let mut rec = Record::new(ts);
    rec.interpolated = true;

    let fields: BTreeSet<&String> = a.values.keys().chain(b.values.keys()).collect();
    for field in fields {
        let value = match schema.kind_of(field) {
            FieldKind::Numeric => interpolate_numeric(a, b, field, ratio, missing),
            FieldKind::Categorical => interpolate_categorical(a, b, field, ratio, missing),
        };
        rec.values.insert(field.clone(), value);
    }
    rec
}

fn interpolate_numeric(
    a: &Record,
    b: &Record,
    field: &str,
    ratio: f64,
    missing: MissingValuePolicy,
) -> Value {
    match (a.number(field), b.number(field)) {
        (Some(x), Some(y)) => Value::Number(ratio.mul_add(y - x, x)),
        // Only one endpoint is defined; no interpolation is possible.
        (Some(x), None) => Value::Number(x),
        (None, Some(y)) => Value::Number(y),
        (None, None) => match missing {
            MissingValuePolicy::Null => Value::Null,
            MissingValuePolicy::Zero => Value::Number(0.0),
        },
    }
}

fn interpolate_categorical(
    a: &Record,
    b: &Record,
    field: &str,
    ratio: f64,
    missing: MissingValuePolicy,
) -> Value {
    let (near, far) = if ratio < 0.5 { (a, b) } else { (b, a) };
    if let Some(t) = near.get(field).as_text() {
        return Value::Text(t.to_string());
    }
    if let Some(t) = far.get(field).as_text() {
        return Value::Text(t.to_string());
    }
    match missing {
        MissingValuePolicy::Null => Value::Null,
        MissingValuePolicy::Zero => Value::Text(String::new()),
    }
}
