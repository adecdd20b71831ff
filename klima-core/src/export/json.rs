//! Pretty-printed JSON output.

use crate::KlimaError;
use crate::record::Record;

/// Serialize records to a pretty-printed JSON array of flat objects.
///
/// Key order is stable: `timestamp` first, fields in their natural (sorted)
/// order, and `interpolated: true` last on synthesized records only.
/// Non-finite floats (`NaN`, infinities) have no JSON representation and
/// serialize as `null`.
///
/// # Errors
/// Returns `Err(KlimaError::Format)` if the serializer fails, which cannot
/// happen for an in-memory buffer.
pub fn to_json(records: &[Record]) -> Result<String, KlimaError> {
    Ok(serde_json::to_string_pretty(records)?)
}
