//! Consistent-interval row generation: one record per interval boundary
//! between two instants, backed by real readings where they exist and by
//! interpolation against nearby neighbors where they do not.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::record::{Record, Schema};
use crate::timeseries::fill::interpolate_between;
use crate::types::MissingValuePolicy;

/// How many intervals to scan in each direction for a neighboring real
/// record before declaring a boundary unfillable.
const NEIGHBOR_RADIUS: i64 = 6;

/// Produce one record per `interval_minutes` boundary in
/// `[floor(start), floor(end)]`.
///
/// For each boundary:
/// - a real record whose bucket rounds to the boundary is used directly
///   (its timestamp snapped to the boundary, earliest record wins when
///   several share a bucket);
/// - otherwise the nearest real records within ±[`NEIGHBOR_RADIUS`]
///   intervals are located; with neighbors on both sides the boundary is
///   interpolated by position ratio (numeric linear, categorical nearest),
///   with a single neighbor its values are copied, flagged interpolated;
/// - a boundary with no neighbor in range is omitted entirely.
///
/// A non-positive interval or an inverted range yields an empty output.
#[must_use]
pub fn consistent_intervals(
    records: &[Record],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval_minutes: i64,
    schema: &Schema,
    missing: MissingValuePolicy,
) -> Vec<Record> {
    if interval_minutes <= 0 {
        return Vec::new();
    }
    let step = interval_minutes * 60;
    let floor = |ts: DateTime<Utc>| -> i64 {
        let secs = ts.timestamp();
        secs - secs.rem_euclid(step)
    };
    let first = floor(start);
    let last = floor(end);
    if first > last {
        return Vec::new();
    }

    // Index real records by rounded bucket start; earliest record wins.
    let mut by_bucket: BTreeMap<i64, &Record> = BTreeMap::new();
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by_key(|r| r.ts);
    for r in sorted {
        by_bucket.entry(floor(r.ts)).or_insert(r);
    }

    let mut out = Vec::new();
    let mut t = first;
    while t <= last {
        let Some(boundary) = DateTime::from_timestamp(t, 0) else {
            break;
        };
        if let Some(r) = by_bucket.get(&t) {
            let mut rec = (*r).clone();
            rec.ts = boundary;
            out.push(rec);
        } else {
            let before = by_bucket.range(t - NEIGHBOR_RADIUS * step..t).next_back();
            let after = by_bucket.range(t + 1..=t + NEIGHBOR_RADIUS * step).next();
            match (before, after) {
                (Some((&b_key, b_rec)), Some((&a_key, a_rec))) => {
                    let ratio = (t - b_key) as f64 / (a_key - b_key) as f64;
                    out.push(interpolate_between(b_rec, a_rec, boundary, ratio, schema, missing));
                }
                (Some((_, near)), None) | (None, Some((_, near))) => {
                    let mut rec = (*near).clone();
                    rec.ts = boundary;
                    rec.interpolated = true;
                    out.push(rec);
                }
                (None, None) => {}
            }
        }
        t += step;
    }
    out
}
