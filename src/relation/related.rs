//! Borrowed views over loaded relationship values.

use std::fmt;

use crate::active_model::Record;

/// The value behind a relationship attribute.
pub enum Related<'a> {
    /// has_one / belongs_to
    One(&'a dyn Record),
    /// has_many
    Many(Vec<&'a dyn Record>),
}

impl fmt::Debug for Related<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Related::One(record) => f
                .debug_tuple("One")
                .field(&record.descriptor().type_name)
                .finish(),
            Related::Many(records) => f.debug_tuple("Many").field(&records.len()).finish(),
        }
    }
}

/// Failure to resolve a relationship attribute.
///
/// Only produced while serializing; the serializer drops the attribute instead
/// of surfacing the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationError {
    /// The entity declares no relationship with this name
    Unknown(String),
    /// The relationship is declared but holds no related record
    Unset(String),
}

impl fmt::Display for RelationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationError::Unknown(name) => write!(f, "Unknown relationship: {}", name),
            RelationError::Unset(name) => write!(f, "Relationship not set: {}", name),
        }
    }
}

impl std::error::Error for RelationError {}

/// Field types that can back a relationship attribute.
pub trait IntoRelated {
    fn related(&self, name: &str) -> Result<Related<'_>, RelationError>;
}

impl<T: Record> IntoRelated for Option<T> {
    fn related(&self, name: &str) -> Result<Related<'_>, RelationError> {
        match self {
            Some(record) => Ok(Related::One(record)),
            None => Err(RelationError::Unset(name.to_string())),
        }
    }
}

impl<T: Record> IntoRelated for Box<T> {
    fn related(&self, _name: &str) -> Result<Related<'_>, RelationError> {
        Ok(Related::One(self.as_ref()))
    }
}

impl<T: Record> IntoRelated for Vec<T> {
    fn related(&self, _name: &str) -> Result<Related<'_>, RelationError> {
        Ok(Related::Many(
            self.iter().map(|record| record as &dyn Record).collect(),
        ))
    }
}
