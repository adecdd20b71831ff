//! Flat tabular CSV output.

use crate::KlimaError;
use crate::record::{Record, Schema, Value};
use crate::timestamp::format_timestamp;

/// Serialize records to CSV text.
///
/// The header row is either the explicit `headers` list or, when `None`,
/// `timestamp`, the schema's fields in declaration order, then
/// `interpolated`. Cells holding commas, quotes, or newlines are quoted with
/// internal quotes doubled (handled by the `csv` writer); `Null` and absent
/// fields render as the empty string. Non-finite floats render through their
/// display form (`NaN`, `inf`), unlike the JSON path which emits `null`.
///
/// # Errors
/// Returns `Err(KlimaError::Format)` if the writer fails, which for an
/// in-memory buffer only happens on row-length bookkeeping bugs.
pub fn to_csv(
    records: &[Record],
    headers: Option<&[String]>,
    schema: &Schema,
) -> Result<String, KlimaError> {
    let columns: Vec<String> = match headers {
        Some(h) => h.to_vec(),
        None => {
            let mut cols = Vec::with_capacity(schema.fields().len() + 2);
            cols.push("timestamp".to_string());
            cols.extend(schema.field_names());
            cols.push("interpolated".to_string());
            cols
        }
    };

    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns)?;
    for record in records {
        let row: Vec<String> = columns.iter().map(|c| cell(record, c)).collect();
        writer.write_record(&row)?;
    }
    let buf = writer
        .into_inner()
        .map_err(|e| KlimaError::Format(e.to_string()))?;
    Ok(String::from_utf8(buf)?)
}

fn cell(record: &Record, column: &str) -> String {
    match column {
        "timestamp" => format_timestamp(record.ts),
        "interpolated" => record.interpolated.to_string(),
        field => match record.get(field) {
            Value::Number(v) => v.to_string(),
            Value::Text(s) => s.clone(),
            Value::Null => String::new(),
        },
    }
}
