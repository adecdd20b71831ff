//! Centered moving-average smoothing over numeric fields.

use crate::record::{FieldKind, Record, Schema, Value};

/// Apply a centered moving average of `window_size` records to every numeric
/// field.
///
/// For the record at index `i`, each numeric field becomes the mean of that
/// field over the half-open window `[i - floor(w/2), i + ceil(w/2))`, clipped
/// to the array bounds, using only the values in the window that coerce to a
/// float. A field with no usable values in its window is left exactly as it
/// was in the source record. Categorical fields, timestamps, and the
/// `interpolated` flag pass through unchanged, so length and order are
/// preserved.
///
/// `window_size <= 1` is the identity.
///
/// ```
/// use klima_core::timeseries::smooth::smooth;
/// use klima_core::{Record, Schema};
/// use klima_core::timestamp::parse_timestamp;
///
/// let schema = Schema::new().numeric("wind_speed");
/// let mk = |ts: &str, v: f64| {
///     Record::new(parse_timestamp(ts).unwrap()).with_value("wind_speed", v)
/// };
/// let records = vec![
///     mk("2025-01-01T00:00:00Z", 2.0),
///     mk("2025-01-01T00:05:00Z", 8.0),
///     mk("2025-01-01T00:10:00Z", 5.0),
/// ];
/// let out = smooth(&records, 3, &schema);
/// assert_eq!(out.len(), 3);
/// // Middle record averages the full window.
/// assert_eq!(out[1].number("wind_speed"), Some(5.0));
/// // Edge windows are clipped: mean of the first two values.
/// assert_eq!(out[0].number("wind_speed"), Some(5.0));
/// ```
#[must_use]
pub fn smooth(records: &[Record], window_size: usize, schema: &Schema) -> Vec<Record> {
    if window_size <= 1 || records.is_empty() {
        return records.to_vec();
    }
    let half_down = window_size / 2;
    let half_up = window_size.div_ceil(2);

    let mut out = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let lo = i.saturating_sub(half_down);
        let hi = (i + half_up).min(records.len());
        let window = &records[lo..hi];

        let mut smoothed = rec.clone();
        for (field, value) in &mut smoothed.values {
            if schema.kind_of(field) != FieldKind::Numeric {
                continue;
            }
            let nums: Vec<f64> = window.iter().filter_map(|r| r.number(field)).collect();
            if !nums.is_empty() {
                *value = Value::Number(nums.iter().sum::<f64>() / nums.len() as f64);
            }
        }
        out.push(smoothed);
    }
    out
}
