//! Error types for record operations.
//!
//! This module provides the `RecordError` enum returned by the entity lifecycle,
//! the field introspector and the commit coordinator.

use crate::session::SessionError;

/// Error type for record operations
///
/// Correctness-class failures (`InvalidField`, `InvalidValueType`, `TypeMismatch`,
/// `Integrity`) always reach the caller. Operational storage failures raised
/// during a commit never show up here: the commit coordinator absorbs them and
/// reports [`CommitOutcome::RolledBack`](crate::CommitOutcome::RolledBack).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Field reference does not name a declared, non-relationship column
    InvalidField(String),
    /// Value cannot be stored in the column's Rust type
    InvalidValueType {
        column: String,
        expected: String,
        actual: String,
    },
    /// Equality comparison across two different entity types
    TypeMismatch {
        left: &'static str,
        right: &'static str,
    },
    /// Operation needs a persisted identity but the record is transient
    PrimaryKeyRequired,
    /// Constraint violation reported by the session
    Integrity(String),
    /// Connection-level failure outside of a commit (staging, queries)
    Operational(String),
    /// Any other session failure
    Unclassified(String),
}

impl RecordError {
    pub(crate) fn invalid_field(field: impl Into<String>) -> Self {
        RecordError::InvalidField(field.into())
    }
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::InvalidField(field) => {
                write!(f, "Invalid input field: {}", field)
            }
            RecordError::InvalidValueType {
                column,
                expected,
                actual,
            } => write!(
                f,
                "Invalid value type for column {}: expected {}, got {}",
                column, expected, actual
            ),
            RecordError::TypeMismatch { left, right } => {
                write!(
                    f,
                    "Objects are not the same ({} vs {}). Cannot compare",
                    left, right
                )
            }
            RecordError::PrimaryKeyRequired => {
                write!(f, "Primary key is required for this operation")
            }
            RecordError::Integrity(msg) => write!(f, "Integrity error: {}", msg),
            RecordError::Operational(msg) => write!(f, "Operational error: {}", msg),
            RecordError::Unclassified(msg) => write!(f, "Session error: {}", msg),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<SessionError> for RecordError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Operational(msg) => RecordError::Operational(msg),
            SessionError::Integrity(msg) => RecordError::Integrity(msg),
            SessionError::Other(msg) => RecordError::Unclassified(msg),
        }
    }
}
