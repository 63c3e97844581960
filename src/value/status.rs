//! The soft-delete status column carried by every entity.

use std::fmt;

use sea_query::Value;
use serde::{Deserialize, Serialize};

use super::ValueType;

/// Lifecycle status stored in the `active` column as a two-character code.
///
/// Only the lifecycle operations move a record between `Active` and
/// `Deleted`; a persisted row with `Deleted` remains queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    /// `"Y"`
    #[default]
    #[serde(rename = "Y")]
    Active,
    /// `"N"`
    #[serde(rename = "N")]
    Inactive,
    /// `"D"`, soft-deleted
    #[serde(rename = "D")]
    Deleted,
}

impl Status {
    /// The stored code.
    pub fn code(self) -> &'static str {
        match self {
            Status::Active => "Y",
            Status::Inactive => "N",
            Status::Deleted => "D",
        }
    }

    /// Parse a stored code; anything outside `Y`/`N`/`D` is rejected.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Y" => Some(Status::Active),
            "N" => Some(Status::Inactive),
            "D" => Some(Status::Deleted),
            _ => None,
        }
    }

    pub fn is_deleted(self) -> bool {
        self == Status::Deleted
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<Status> for Value {
    fn from(status: Status) -> Self {
        Value::from(status.code())
    }
}

impl ValueType for Status {
    fn into_value(self) -> Value {
        Value::from(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(Some(code)) => Status::from_code(&code),
            _ => None,
        }
    }

    fn null_value() -> Value {
        Value::String(None)
    }

    fn type_name() -> &'static str {
        "Status"
    }
}
