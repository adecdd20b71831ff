//! Cadence estimation and gap detection for sensor series.

use chrono::TimeDelta;

use crate::record::Record;

/// Estimate a representative step (in seconds) from positive adjacent
/// timestamp deltas in the input series.
///
/// Prefer the mode (most frequent positive delta); if there is no unique
/// mode, return the lower median so the result is always an actually
/// observed cadence. Input order does not matter and duplicate timestamps
/// are ignored. Returns `None` when fewer than two distinct timestamps are
/// present.
///
/// ```
/// use klima_core::timeseries::infer::estimate_step_seconds;
/// use klima_core::Record;
/// use chrono::DateTime;
///
/// let mk = |sec: i64| Record::new(DateTime::from_timestamp(sec, 0).unwrap());
/// // Adjacent deltas: 300,300,300,600 => unique mode is 300
/// let records = vec![mk(0), mk(300), mk(600), mk(900), mk(1500)];
/// assert_eq!(estimate_step_seconds(&records), Some(300));
/// ```
#[must_use]
pub fn estimate_step_seconds(records: &[Record]) -> Option<i64> {
    let deltas = positive_deltas(records);
    if deltas.is_empty() {
        return None;
    }

    let mut best_delta: i64 = deltas[0];
    let mut best_count: usize = 0;
    let mut num_best_candidates: usize = 0;

    let mut cur_delta: i64 = deltas[0];
    let mut cur_count: usize = 1;
    for &d in deltas.iter().skip(1) {
        if d == cur_delta {
            cur_count += 1;
            continue;
        }
        if cur_count > best_count {
            best_count = cur_count;
            best_delta = cur_delta;
            num_best_candidates = 1;
        } else if cur_count == best_count {
            num_best_candidates = num_best_candidates.saturating_add(1);
        }
        cur_delta = d;
        cur_count = 1;
    }
    if cur_count > best_count {
        best_delta = cur_delta;
        num_best_candidates = 1;
    } else if cur_count == best_count {
        num_best_candidates = num_best_candidates.saturating_add(1);
    }

    if num_best_candidates == 1 {
        return Some(best_delta);
    }

    // Lower median
    let mid = deltas.len() / 2;
    if deltas.len() % 2 == 1 {
        Some(deltas[mid])
    } else {
        Some(deltas[mid - 1])
    }
}

/// Whether any adjacent pair of records is further apart than
/// `interval_minutes`, i.e. whether the series has holes the gap filler
/// could address. Non-positive intervals and series shorter than two
/// records report no gaps.
#[must_use]
pub fn has_gaps(records: &[Record], interval_minutes: i64) -> bool {
    if interval_minutes <= 0 {
        return false;
    }
    let step = interval_minutes * 60;
    positive_deltas(records).iter().any(|&d| d > step)
}

/// Sorted positive adjacent deltas (seconds) of the series' timestamps.
fn positive_deltas(records: &[Record]) -> Vec<i64> {
    if records.len() < 2 {
        return Vec::new();
    }
    let mut ts: Vec<_> = records.iter().map(|r| r.ts).collect();
    ts.sort();

    let mut deltas: Vec<i64> = Vec::with_capacity(ts.len().saturating_sub(1));
    let mut last = ts[0];
    for &cur in ts.iter().skip(1) {
        let dt: TimeDelta = cur - last;
        if dt > TimeDelta::zero() {
            deltas.push(dt.num_seconds());
            last = cur;
        }
    }
    deltas.sort_unstable();
    deltas
}
