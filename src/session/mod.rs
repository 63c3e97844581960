//! Session Module
//!
//! Provides the `Session` trait: the unit-of-work the entity lifecycle stages
//! changes into and the commit coordinator drives.
//!
//! A session is an explicit value passed to every lifecycle call. Nothing in
//! this crate reaches for an ambient, process-wide session.
//!
//! [`MemorySession`] is the in-process implementation used by the test suite and
//! by applications that do not need durable storage.

use std::collections::BTreeMap;
use std::fmt;

use sea_query::Value;

use crate::descriptor::EntityDescriptor;

pub mod memory;

pub use memory::{MemorySession, SessionStats};

/// A persisted row: column name to value, primary key excluded.
pub type Row = BTreeMap<String, Value>;

/// Failure reported by a session, classified the way the commit coordinator
/// needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Connection-level failure: lost connection, missing table, timeout
    Operational(String),
    /// Constraint violation: uniqueness, not-null, foreign key
    Integrity(String),
    /// Anything else
    Other(String),
}

impl SessionError {
    pub fn is_operational(&self) -> bool {
        matches!(self, SessionError::Operational(_))
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Operational(msg) => write!(f, "Operational error: {msg}"),
            SessionError::Integrity(msg) => write!(f, "Integrity error: {msg}"),
            SessionError::Other(msg) => write!(f, "Session error: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Unit-of-work over a storage engine.
///
/// Staging calls (`add`, `delete`, `delete_all`) only record intent; nothing is
/// durable until `commit` succeeds. `rollback` discards staged work and `close`
/// releases the session's resources. Reads see staged work of the same session.
///
/// Methods take `&self` so a session can be shared by reference across the
/// records that use it; implementations provide their own interior locking.
///
/// # Examples
///
/// ```
/// use activebase::session::{MemorySession, Row, Session};
/// use activebase::Value;
///
/// # fn main() -> Result<(), activebase::session::SessionError> {
/// let session = MemorySession::new();
/// session.create_table("notes");
///
/// let mut row = Row::new();
/// row.insert("body".to_string(), Value::from("hello"));
/// let id = session.add("notes", None, row)?;
/// session.commit()?;
///
/// assert!(session.get("notes", id)?.is_some());
/// # Ok(())
/// # }
/// ```
pub trait Session {
    /// Stage an insert (`id == None`) or an update of `row` in `table`.
    ///
    /// Returns the identity of the staged row; a fresh one is assigned for
    /// inserts.
    fn add(&self, table: &'static str, id: Option<i64>, row: Row) -> Result<i64, SessionError>;

    /// Stage removal of one row.
    fn delete(&self, table: &'static str, id: i64) -> Result<(), SessionError>;

    /// Stage removal of every row in `table`.
    fn delete_all(&self, table: &'static str) -> Result<(), SessionError>;

    /// Make staged work durable.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Integrity` on a constraint violation and
    /// `SessionError::Operational` when the engine cannot be reached.
    fn commit(&self) -> Result<(), SessionError>;

    /// Discard staged work.
    fn rollback(&self) -> Result<(), SessionError>;

    /// Release the session; staged work is discarded.
    fn close(&self) -> Result<(), SessionError>;

    /// Fetch one row by identity.
    fn get(&self, table: &'static str, id: i64) -> Result<Option<Row>, SessionError>;

    /// Fetch every row of `table`, ordered by identity.
    fn all(&self, table: &'static str) -> Result<Vec<(i64, Row)>, SessionError>;

    /// Create the storage for each entity that does not have it yet.
    fn create_all(&self, descriptors: &[&'static EntityDescriptor]) -> Result<(), SessionError>;
}

impl<S: Session + ?Sized> Session for &S {
    fn add(&self, table: &'static str, id: Option<i64>, row: Row) -> Result<i64, SessionError> {
        (**self).add(table, id, row)
    }

    fn delete(&self, table: &'static str, id: i64) -> Result<(), SessionError> {
        (**self).delete(table, id)
    }

    fn delete_all(&self, table: &'static str) -> Result<(), SessionError> {
        (**self).delete_all(table)
    }

    fn commit(&self) -> Result<(), SessionError> {
        (**self).commit()
    }

    fn rollback(&self) -> Result<(), SessionError> {
        (**self).rollback()
    }

    fn close(&self) -> Result<(), SessionError> {
        (**self).close()
    }

    fn get(&self, table: &'static str, id: i64) -> Result<Option<Row>, SessionError> {
        (**self).get(table, id)
    }

    fn all(&self, table: &'static str) -> Result<Vec<(i64, Row)>, SessionError> {
        (**self).all(table)
    }

    fn create_all(&self, descriptors: &[&'static EntityDescriptor]) -> Result<(), SessionError> {
        (**self).create_all(descriptors)
    }
}
