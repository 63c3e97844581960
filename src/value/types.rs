//! ValueType trait for typed field conversions
//!
//! The `ValueType` trait maps the Rust type of an entity field to its
//! `sea_query::Value` variant. The `Record` derive routes every generated
//! getter and setter through it, so a patch value is only ever assigned when it
//! carries the variant the field's type expects.
//!
//! Implemented for:
//!
//! - Integer types: `i8`, `i16`, `i32`, `i64`, `u8`, `u16`, `u32`, `u64`
//! - Floating point: `f32`, `f64`
//! - `bool`, `char`, `String`, `Vec<u8>`
//! - JSON: `serde_json::Value`
//! - chrono: `NaiveDate`, `NaiveTime`, `NaiveDateTime`, `DateTime<Utc>`,
//!   `DateTime<FixedOffset>`
//! - `uuid::Uuid`
//! - [`Status`](super::Status)
//! - `Option<T>` for all of the above

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sea_query::Value;
use uuid::Uuid;

use crate::active_model::RecordError;

/// Maps a Rust field type to its `sea_query::Value` variant.
///
/// ```rust
/// use activebase::value::ValueType;
/// use sea_query::Value;
///
/// let value = ValueType::into_value(42i64);
/// assert!(matches!(value, Value::BigInt(Some(42))));
///
/// let extracted = <Option<i64> as ValueType>::from_value(Value::BigInt(None));
/// assert_eq!(extracted, Some(None));
/// ```
pub trait ValueType: Sized {
    /// Convert into the corresponding `Value` variant.
    fn into_value(self) -> Value;

    /// Extract from a `Value`; `None` when the variant does not match or is null.
    fn from_value(value: Value) -> Option<Self>;

    /// The null form of this type's variant.
    fn null_value() -> Value;

    /// Name used in `InvalidValueType` errors.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Convert `value` into the field type `T`, naming `column` in the error.
///
/// Used by code generated from `#[derive(Record)]`.
pub fn convert<T: ValueType>(column: &str, value: Value) -> Result<T, RecordError> {
    let actual = format!("{:?}", value);
    T::from_value(value).ok_or_else(|| RecordError::InvalidValueType {
        column: column.to_string(),
        expected: T::type_name().to_string(),
        actual,
    })
}

// Scalars sea-query stores unboxed and `Copy`.
macro_rules! impl_copy_value_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ValueType for $ty {
                fn into_value(self) -> Value {
                    Value::from(self)
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(Some(v)) => Some(v),
                        _ => None,
                    }
                }

                fn null_value() -> Value {
                    Value::$variant(None)
                }
            }
        )*
    };
}

impl_copy_value_type! {
    i8 => TinyInt,
    i16 => SmallInt,
    i32 => Int,
    i64 => BigInt,
    u8 => TinyUnsigned,
    u16 => SmallUnsigned,
    u32 => Unsigned,
    u64 => BigUnsigned,
    f32 => Float,
    f64 => Double,
    bool => Bool,
    char => Char,
}

// Payloads sea-query may keep behind a `Box`; `<T as Clone>::clone(&v)` reads
// through either representation.
macro_rules! impl_owned_value_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ValueType for $ty {
                fn into_value(self) -> Value {
                    Value::from(self)
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(Some(v)) => Some(<$ty as Clone>::clone(&v)),
                        _ => None,
                    }
                }

                fn null_value() -> Value {
                    Value::$variant(None)
                }
            }
        )*
    };
}

impl_owned_value_type! {
    String => String,
    Vec<u8> => Bytes,
    serde_json::Value => Json,
    NaiveDate => ChronoDate,
    NaiveTime => ChronoTime,
    NaiveDateTime => ChronoDateTime,
    DateTime<Utc> => ChronoDateTimeUtc,
    DateTime<FixedOffset> => ChronoDateTimeWithTimeZone,
    Uuid => Uuid,
}

impl<T: ValueType> ValueType for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => T::null_value(),
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        if super::is_null(&value) {
            return Some(None);
        }
        T::from_value(value).map(Some)
    }

    fn null_value() -> Value {
        T::null_value()
    }

    fn type_name() -> &'static str {
        T::type_name()
    }
}
