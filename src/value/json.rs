//! Projection of `sea_query::Value` into plain JSON data.
//!
//! Date and time variants are rendered as strings: naive values through their
//! `Display` form (`2024-03-01 12:30:00`), zoned timestamps with a numeric
//! offset (`2024-03-01 08:00:00+00:00`). Every other variant keeps its raw
//! value. Nulls of any variant become `null`.

use sea_query::Value;
use serde_json::Value as JsonValue;

const ZONED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

/// Whether `value` holds a chrono date, time or timestamp.
pub fn is_temporal(value: &Value) -> bool {
    matches!(
        value,
        Value::ChronoDate(_)
            | Value::ChronoTime(_)
            | Value::ChronoDateTime(_)
            | Value::ChronoDateTimeUtc(_)
            | Value::ChronoDateTimeLocal(_)
            | Value::ChronoDateTimeWithTimeZone(_)
    )
}

/// Canonical string form of a temporal value, `None` for anything else or null.
pub fn temporal_string(value: &Value) -> Option<String> {
    match value {
        Value::ChronoDate(Some(v)) => Some(v.to_string()),
        Value::ChronoTime(Some(v)) => Some(v.to_string()),
        Value::ChronoDateTime(Some(v)) => Some(v.to_string()),
        Value::ChronoDateTimeUtc(Some(v)) => Some(v.format(ZONED_FORMAT).to_string()),
        Value::ChronoDateTimeLocal(Some(v)) => Some(v.format(ZONED_FORMAT).to_string()),
        Value::ChronoDateTimeWithTimeZone(Some(v)) => Some(v.format(ZONED_FORMAT).to_string()),
        _ => None,
    }
}

/// Convert a field value into its plain-data form.
pub fn to_json(value: &Value) -> JsonValue {
    if let Some(rendered) = temporal_string(value) {
        return JsonValue::String(rendered);
    }

    match value {
        Value::Bool(Some(v)) => JsonValue::Bool(*v),
        Value::TinyInt(Some(v)) => JsonValue::from(*v),
        Value::SmallInt(Some(v)) => JsonValue::from(*v),
        Value::Int(Some(v)) => JsonValue::from(*v),
        Value::BigInt(Some(v)) => JsonValue::from(*v),
        Value::TinyUnsigned(Some(v)) => JsonValue::from(*v),
        Value::SmallUnsigned(Some(v)) => JsonValue::from(*v),
        Value::Unsigned(Some(v)) => JsonValue::from(*v),
        Value::BigUnsigned(Some(v)) => JsonValue::from(*v),
        Value::Float(Some(v)) => JsonValue::from(f64::from(*v)),
        Value::Double(Some(v)) => JsonValue::from(*v),
        Value::Char(Some(v)) => JsonValue::String(v.to_string()),
        Value::String(Some(v)) => JsonValue::String(v.to_string()),
        Value::Bytes(Some(v)) => JsonValue::Array(v.iter().map(|b| JsonValue::from(*b)).collect()),
        Value::Json(Some(v)) => JsonValue::clone(v),
        Value::Uuid(Some(v)) => JsonValue::String(v.to_string()),
        _ => JsonValue::Null,
    }
}
