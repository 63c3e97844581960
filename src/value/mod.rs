//! Value type system for activebase
//!
//! Entity fields travel as `sea_query::Value`, the tagged value type of the
//! mapping layer. This module provides the conversions between those values and
//! the Rust field types of an entity, the `Status` soft-delete column, and the
//! projection of values into plain JSON data.
//!
//! - **`ValueType`** - typed conversion used by generated getters/setters
//! - **`Status`** - the `active` column (`Y`/`N`/`D`)
//! - **`json`** - value → `serde_json::Value` with date normalization

pub mod json;
pub mod status;
pub mod types;

pub use sea_query::Value;
pub use status::Status;
pub use types::{convert, ValueType};

/// Whether `value` is the null form of its variant.
pub fn is_null(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::Char(None)
            | Value::String(None)
            | Value::Bytes(None)
            | Value::Json(None)
            | Value::ChronoDate(None)
            | Value::ChronoTime(None)
            | Value::ChronoDateTime(None)
            | Value::ChronoDateTimeUtc(None)
            | Value::ChronoDateTimeLocal(None)
            | Value::ChronoDateTimeWithTimeZone(None)
            | Value::Uuid(None)
    )
}
