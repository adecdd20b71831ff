//! Bucketing of irregular sensor readings into fixed-width intervals.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::record::{FieldKind, Record, Schema, Value};
use crate::types::AggregateMethod;

/// Start of the half-open bucket `[start, start + step)` containing `ts`.
fn bucket_start(ts: DateTime<Utc>, step_secs: i64) -> Option<DateTime<Utc>> {
    let secs = ts.timestamp();
    DateTime::from_timestamp(secs - secs.rem_euclid(step_secs), 0)
}

/// Resample irregular readings into fixed `interval_minutes` buckets.
///
/// - Buckets are half-open `[start, start + interval)` with
///   `start = floor(ts / interval) * interval` on the UTC epoch.
/// - One output record per bucket that has at least one source record, with
///   `ts` at the bucket start; buckets with no source records are not
///   fabricated (that is the gap filler's job).
/// - Output is ascending by timestamp and free of duplicate bucket starts.
/// - Numeric fields aggregate per `method` over the values that coerce to a
///   float; a bucket with no usable numeric values yields `Value::Null` for
///   that field, never zero.
/// - Categorical fields degrade `Mean`/`Max`/`Min` to the bucket mode
///   (most frequent value, earliest seen wins ties); `First`/`Last` behave
///   as named.
/// - `fields` selects which fields to aggregate; `None` uses the first
///   record's field set.
/// - An output record is flagged interpolated only when every contributing
///   record was synthetic.
///
/// Guardrails: empty input or `interval_minutes <= 0` returns the input
/// unchanged.
///
/// ```
/// use klima_core::timeseries::resample::resample;
/// use klima_core::{AggregateMethod, Record, Schema};
/// use klima_core::timestamp::parse_timestamp;
///
/// let schema = Schema::new().numeric("humidity");
/// let records = vec![
///     Record::new(parse_timestamp("2025-01-01T00:00:00Z").unwrap()).with_value("humidity", 40.0),
///     Record::new(parse_timestamp("2025-01-01T00:10:00Z").unwrap()).with_value("humidity", 60.0),
/// ];
/// let out = resample(records, 15, AggregateMethod::Mean, None, &schema);
/// assert_eq!(out.len(), 1);
/// assert_eq!(out[0].ts, parse_timestamp("2025-01-01T00:00:00Z").unwrap());
/// assert_eq!(out[0].number("humidity"), Some(50.0));
/// ```
#[must_use]
pub fn resample(
    mut records: Vec<Record>,
    interval_minutes: i64,
    method: AggregateMethod,
    fields: Option<&[String]>,
    schema: &Schema,
) -> Vec<Record> {
    if records.is_empty() || interval_minutes <= 0 {
        return records;
    }
    let step_secs = interval_minutes * 60;

    records.sort_by_key(|r| r.ts);

    let field_list: Vec<String> = match fields {
        Some(f) => f.to_vec(),
        None => records[0].values.keys().cloned().collect(),
    };

    let mut out: Vec<Record> = Vec::new();

    let mut iter = records.into_iter();
    let Some(first) = iter.find(|r| bucket_start(r.ts, step_secs).is_some()) else {
        return Vec::new();
    };
    // `find` guarantees a representable bucket for `first`.
    let Some(mut cur_bucket) = bucket_start(first.ts, step_secs) else {
        return Vec::new();
    };
    let mut members: Vec<Record> = vec![first];

    for r in iter {
        let Some(bucket) = bucket_start(r.ts, step_secs) else {
            continue;
        };
        if bucket == cur_bucket {
            members.push(r);
        } else {
            out.push(aggregate_bucket(cur_bucket, &members, &field_list, method, schema));
            cur_bucket = bucket;
            members.clear();
            members.push(r);
        }
    }
    out.push(aggregate_bucket(cur_bucket, &members, &field_list, method, schema));

    out
}

fn aggregate_bucket(
    bucket: DateTime<Utc>,
    members: &[Record],
    fields: &[String],
    method: AggregateMethod,
    schema: &Schema,
) -> Record {
    let mut rec = Record::new(bucket);
    rec.interpolated = !members.is_empty() && members.iter().all(|r| r.interpolated);
    for field in fields {
        let value = match schema.kind_of(field) {
            FieldKind::Numeric => aggregate_numeric(members, field, method),
            FieldKind::Categorical => aggregate_categorical(members, field, method),
        };
        rec.values.insert(field.clone(), value);
    }
    rec
}

fn aggregate_numeric(members: &[Record], field: &str, method: AggregateMethod) -> Value {
    let nums: Vec<f64> = members.iter().filter_map(|r| r.number(field)).collect();
    let Some((&head, _)) = nums.split_first() else {
        return Value::Null;
    };
    let v = match method {
        AggregateMethod::Mean => nums.iter().sum::<f64>() / nums.len() as f64,
        AggregateMethod::First => head,
        AggregateMethod::Last => nums[nums.len() - 1],
        AggregateMethod::Max => nums.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        AggregateMethod::Min => nums.iter().copied().fold(f64::INFINITY, f64::min),
    };
    Value::Number(v)
}

fn aggregate_categorical(members: &[Record], field: &str, method: AggregateMethod) -> Value {
    let texts: Vec<&str> = members
        .iter()
        .filter_map(|r| r.get(field).as_text())
        .collect();
    let Some((&head, _)) = texts.split_first() else {
        return Value::Null;
    };
    let chosen = match method {
        AggregateMethod::First => head,
        AggregateMethod::Last => texts[texts.len() - 1],
        // No arithmetic meaning for categories; use the bucket mode.
        AggregateMethod::Mean | AggregateMethod::Max | AggregateMethod::Min => mode(&texts),
    };
    Value::Text(chosen.to_string())
}

/// Most frequent value; the earliest-seen value wins ties.
fn mode<'a>(texts: &[&'a str]) -> &'a str {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for &t in texts {
        *counts.entry(t).or_insert(0) += 1;
    }
    let mut best = texts[0];
    let mut best_count = 0usize;
    for &t in texts {
        let c = counts[t];
        if c > best_count {
            best = t;
            best_count = c;
        }
    }
    best
}
