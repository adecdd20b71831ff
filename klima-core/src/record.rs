//! The record model: one observation per instant, with a schema describing
//! which fields carry numbers and which carry categories.
//!
//! Records are open field bags (stations disagree about which sensors they
//! carry), but aggregation behavior is never decided by inspecting a value's
//! runtime type: the [`Schema`] says up front which fields are numeric and
//! which are categorical.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::KlimaError;
use crate::timestamp::{format_timestamp, parse_timestamp};

/// Keys that are record metadata, never sensor fields.
pub const RESERVED_KEYS: [&str; 2] = ["timestamp", "interpolated"];

/// A single field value.
///
/// `Null` is a first-class value: it is how "no reading" travels through the
/// pipeline, distinct from a reading of zero. The legacy feeds used magic
/// strings (`"error"`, `"alat rusak"`) for broken sensors; those arrive here
/// as `Text` and are simply excluded from numeric aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A numeric reading.
    Number(f64),
    /// A categorical reading, e.g. a compass point for wind direction.
    Text(String),
    /// No reading.
    Null,
}

impl Value {
    /// The numeric value, if this is a `Number`.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Coerce to a float for aggregation: numbers pass through, text is
    /// parsed in full (`"23.5"` yields 23.5, `"23.5 mm"` yields nothing).
    #[must_use]
    pub fn coerce_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Self::Null => None,
        }
    }

    /// The text value, if this is `Text`.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is the `Null` value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// One timestamped observation.
///
/// Records are immutable by convention: every pipeline stage consumes or
/// borrows its input and returns a freshly built sequence, so re-running a
/// stage over the same input is always safe.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Instant of the observation, UTC.
    pub ts: DateTime<Utc>,
    /// True when this record was synthesized by gap filling rather than
    /// observed by a sensor. Survives smoothing and formatting so consumers
    /// can tell actual from estimated data.
    pub interpolated: bool,
    /// Field values, keyed by field name in sorted order.
    pub values: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record at `ts`.
    #[must_use]
    pub fn new(ts: DateTime<Utc>) -> Self {
        Self {
            ts,
            interpolated: false,
            values: BTreeMap::new(),
        }
    }

    /// Builder-style helper to attach a field value.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Look up a field value; absent fields read as `Null`.
    #[must_use]
    pub fn get(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&Value::Null)
    }

    /// Numeric view of a field, with text coercion (see [`Value::coerce_f64`]).
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).coerce_f64()
    }

    /// Build a record from a flat JSON object (one element of an API
    /// response body). Returns `None` when the object has no parseable
    /// `timestamp`, so callers can skip bad rows instead of failing the
    /// whole payload.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let obj = value.as_object()?;
        let ts = match obj.get("timestamp")? {
            serde_json::Value::String(s) => parse_timestamp(s)?,
            serde_json::Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?)?,
            _ => return None,
        };
        let interpolated = obj
            .get("interpolated")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        let mut values = BTreeMap::new();
        for (k, v) in obj {
            if RESERVED_KEYS.contains(&k.as_str()) {
                continue;
            }
            let value = match v {
                serde_json::Value::Number(n) => {
                    n.as_f64().map_or(Value::Null, Value::Number)
                }
                serde_json::Value::String(s) => Value::Text(s.clone()),
                _ => Value::Null,
            };
            values.insert(k.clone(), value);
        }
        Some(Self {
            ts,
            interpolated,
            values,
        })
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.interpolated);
        let mut map = serializer.serialize_map(Some(1 + self.values.len() + extra))?;
        map.serialize_entry("timestamp", &format_timestamp(self.ts))?;
        for (k, v) in &self.values {
            match v {
                Value::Null => map.serialize_entry(k, &serde_json::Value::Null)?,
                other => map.serialize_entry(k, other)?,
            }
        }
        if self.interpolated {
            map.serialize_entry("interpolated", &true)?;
        }
        map.end()
    }
}

/// Parse an API response body (a JSON array of flat objects) into records.
///
/// Rows without a parseable timestamp are skipped, never fatal; only a
/// malformed or wrongly shaped document is an error.
///
/// # Errors
/// Returns `Err(KlimaError::Format)` when `body` is not valid JSON, and
/// `Err(KlimaError::Data)` when it parses but is not an array.
pub fn parse_records(body: &str) -> Result<Vec<Record>, KlimaError> {
    let doc: serde_json::Value = serde_json::from_str(body)?;
    let Some(rows) = doc.as_array() else {
        return Err(KlimaError::data("expected a JSON array of records"));
    };
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        match Record::from_value(row) {
            Some(r) => out.push(r),
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(row = %row, "skipping record without a valid timestamp");
            }
        }
    }
    Ok(out)
}

/// Whether a field holds numbers or categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Aggregated arithmetically, interpolated linearly.
    Numeric,
    /// Aggregated by mode, interpolated by nearest neighbor.
    Categorical,
}

/// Description of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name as it appears in records.
    pub name: String,
    /// Numeric or categorical.
    pub kind: FieldKind,
    /// Optional unit tag, e.g. `"°C"` or `"mm"`. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Ordered description of the fields in a series.
///
/// The order of fields is the column order of CSV output when no explicit
/// header list is given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    /// An empty schema.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Builder-style helper to append a numeric field.
    #[must_use]
    pub fn numeric(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Numeric, None)
    }

    /// Builder-style helper to append a numeric field with a unit tag.
    #[must_use]
    pub fn numeric_with_unit(self, name: impl Into<String>, unit: impl Into<String>) -> Self {
        self.field(name, FieldKind::Numeric, Some(unit.into()))
    }

    /// Builder-style helper to append a categorical field.
    #[must_use]
    pub fn categorical(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Categorical, None)
    }

    /// Append an arbitrary field definition.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind, unit: Option<String>) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            kind,
            unit,
        });
        self
    }

    /// The field definitions, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Field names in declaration order.
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    /// The kind of a named field. Unknown fields default to `Numeric`, the
    /// overwhelmingly common case for sensor data.
    #[must_use]
    pub fn kind_of(&self, name: &str) -> FieldKind {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map_or(FieldKind::Numeric, |f| f.kind)
    }

    /// Derive a schema from data for callers that have none.
    ///
    /// A field is numeric when its first non-null value coerces to a float,
    /// categorical otherwise. Fields that are null throughout default to
    /// numeric. Field order follows first appearance across the input.
    #[must_use]
    pub fn infer(records: &[Record]) -> Self {
        let mut order: Vec<String> = Vec::new();
        let mut kinds: BTreeMap<String, Option<FieldKind>> = BTreeMap::new();
        for r in records {
            for (name, value) in &r.values {
                if !kinds.contains_key(name) {
                    order.push(name.clone());
                }
                let slot = kinds.entry(name.clone()).or_insert(None);
                if slot.is_none() && !value.is_null() {
                    *slot = Some(if value.coerce_f64().is_some() {
                        FieldKind::Numeric
                    } else {
                        FieldKind::Categorical
                    });
                }
            }
        }
        let fields = order
            .into_iter()
            .map(|name| {
                let kind = kinds
                    .get(&name)
                    .copied()
                    .flatten()
                    .unwrap_or(FieldKind::Numeric);
                FieldDef {
                    name,
                    kind,
                    unit: None,
                }
            })
            .collect();
        Self { fields }
    }
}
