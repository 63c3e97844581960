//! Core traits for active records.
//!
//! [`Record`] is the object-safe half: field access by name, relationship
//! access and identity. It is what the serializer, equality and the session
//! row mapping work against. [`Entity`] adds the type-level half: the static
//! descriptor, construction and the lifecycle operations.
//!
//! Both are normally implemented by `#[derive(Record)]`.

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;

use sea_query::Value;

#[cfg(feature = "metrics")]
use crate::metrics::METRICS;
#[cfg(feature = "tracing")]
use crate::metrics::tracing_helpers;

use super::error::RecordError;
use super::patch::Patch;
use crate::commit::{self, CommitOutcome};
use crate::descriptor::{EntityDescriptor, PRIMARY_KEY};
use crate::introspect::{self, FieldRef, SchemaEntry};
use crate::query::Column;
use crate::relation::{Related, RelationError};
use crate::session::{Row, Session, SessionError};
use crate::value::Status;

/// Field-level access to an entity instance.
///
/// # Example
///
/// ```no_run
/// use activebase::{Record, Status};
///
/// fn retire(record: &mut dyn Record) {
///     record.set_status(Status::Inactive);
///     println!("{} now {}", record.descriptor().type_name, record.status());
/// }
/// ```
pub trait Record: Any + fmt::Debug {
    /// The static field registry of this record's type.
    fn descriptor(&self) -> &'static EntityDescriptor;

    /// Current value of a column; `None` for relationships and unknown names.
    fn get(&self, field: &str) -> Option<Value>;

    /// Assign a column.
    ///
    /// Returns `Ok(false)` when `field` is not a declared column.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidValueType` when `value` does not convert
    /// into the field's Rust type; the field is left unchanged.
    fn set(&mut self, field: &str, value: Value) -> Result<bool, RecordError>;

    /// Borrow the loaded value of a relationship attribute.
    fn related(&self, name: &str) -> Result<Related<'_>, RelationError>;

    fn as_any(&self) -> &dyn Any;

    /// Identity; `None` while the record is transient.
    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: Option<i64>);

    fn status(&self) -> Status;

    fn set_status(&mut self, status: Status);

    /// The storage row for this record: every column except the primary key.
    fn row(&self) -> Row {
        self.descriptor()
            .columns
            .iter()
            .filter(|c| !c.primary_key)
            .filter_map(|c| self.get(c.name).map(|value| (c.name.to_string(), value)))
            .collect()
    }

    /// Compare every real field with `other`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::TypeMismatch` when `other` is a different entity
    /// type; comparing across types is a caller bug, not an inequality.
    fn try_eq(&self, other: &dyn Record) -> Result<bool, RecordError> {
        if self.as_any().type_id() != other.as_any().type_id() {
            return Err(RecordError::TypeMismatch {
                left: self.descriptor().type_name,
                right: other.descriptor().type_name,
            });
        }
        Ok(introspect::keys(self.descriptor())
            .into_iter()
            .all(|key| self.get(key) == other.get(key)))
    }
}

/// Type-level entity operations: introspection, construction and lifecycle.
///
/// Lifecycle states are Transient (`id() == None`), Persisted and SoftDeleted
/// (`status() == Status::Deleted`, row still stored).
///
/// Every operation that persists takes the session explicitly and a `commit`
/// flag where the caller may want to batch: with `commit = false` the work is
/// only staged and [`CommitOutcome::Deferred`] is returned.
///
/// # Example
///
/// ```no_run
/// use activebase::session::{MemorySession, Session};
/// use activebase::{Entity, Patch, Record, Status};
///
/// #[derive(Debug, Default, Record)]
/// #[table_name = "orders"]
/// struct Order {
///     #[primary_key]
///     id: Option<i64>,
///     active: Status,
///     total: f64,
/// }
///
/// # fn main() -> Result<(), activebase::RecordError> {
/// let session = MemorySession::new();
/// session.create_all(&[Order::entity_descriptor()])?;
/// let mut order = Order::create(Patch::new().set(Order::TOTAL, 99.5))?;
/// order.save(&session, true)?;
/// order.sdelete(&session, true)?;
/// assert_eq!(order.active, Status::Deleted);
/// # Ok(())
/// # }
/// ```
pub trait Entity: Record + Default + Sized {
    /// The static field registry of this type.
    fn entity_descriptor() -> &'static EntityDescriptor;

    /// Persisted column names minus relationship names.
    fn keys() -> BTreeSet<&'static str> {
        introspect::keys(Self::entity_descriptor())
    }

    /// Real fields in declaration order, minus `exclude`.
    fn fields<'a, I, F>(exclude: I) -> Vec<&'static str>
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldRef<'a>>,
    {
        introspect::fields(Self::entity_descriptor(), exclude)
    }

    /// `{name, key}` pairs for form and table builders.
    fn schema<'a, I, F>(exclude: I) -> Vec<SchemaEntry>
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldRef<'a>>,
    {
        introspect::schema(Self::entity_descriptor(), exclude)
    }

    /// Queryable handle of a declared column.
    fn column_handle<'a>(field: impl Into<FieldRef<'a>>) -> Result<Column, RecordError> {
        introspect::column_handle(Self::entity_descriptor(), field)
    }

    /// Build a transient instance seeded from `patch`. Nothing is persisted.
    fn create(patch: Patch) -> Result<Self, RecordError> {
        let mut record = Self::default();
        record.apply(patch)?;
        Ok(record)
    }

    /// Assign every patch entry that names a real field other than `id`.
    ///
    /// Unknown fields, relationships and `id` are dropped without error.
    /// Returns the number of assignments made. When an entry fails to convert,
    /// fields assigned earlier in the patch are restored and the record is left
    /// as it was.
    fn apply(&mut self, patch: Patch) -> Result<usize, RecordError> {
        let keys = Self::keys();
        let mut previous: Vec<(String, Value)> = Vec::new();
        let mut applied = 0;
        for (field, value) in patch {
            if field == PRIMARY_KEY || !keys.contains(field.as_str()) {
                log::debug!(
                    "Ignoring field {} on {}",
                    field,
                    Self::entity_descriptor().type_name
                );
                continue;
            }
            let before = self.get(&field);
            match self.set(&field, value) {
                Ok(true) => {
                    applied += 1;
                    if let Some(before) = before {
                        previous.push((field, before));
                    }
                }
                Ok(false) => {}
                Err(err) => {
                    for (field, before) in previous.into_iter().rev() {
                        if let Err(restore) = self.set(&field, before) {
                            log::warn!("Could not restore field {}: {}", field, restore);
                        }
                    }
                    return Err(err);
                }
            }
        }
        Ok(applied)
    }

    /// Apply `patch`, then `save` when `commit` is true.
    ///
    /// With `commit = false` nothing is staged in the session.
    fn update<S: Session + ?Sized>(
        &mut self,
        session: &S,
        patch: Patch,
        commit: bool,
    ) -> Result<CommitOutcome, RecordError> {
        self.apply(patch)?;
        if commit {
            self.save(session, true)
        } else {
            Ok(CommitOutcome::Deferred)
        }
    }

    /// Stage this record in the session and commit when `commit` is true.
    ///
    /// A transient record receives its identity here, whether or not the
    /// commit later succeeds.
    fn save<S: Session + ?Sized>(
        &mut self,
        session: &S,
        commit: bool,
    ) -> Result<CommitOutcome, RecordError> {
        let descriptor = Self::entity_descriptor();
        let id = session.add(descriptor.table_name, self.id(), self.row())?;
        self.set_id(Some(id));
        log::debug!("Staged {} #{}", descriptor.type_name, id);

        if commit {
            commit::commit(session)
        } else {
            Ok(CommitOutcome::Deferred)
        }
    }

    /// Remove this record's row and commit.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::PrimaryKeyRequired` for a transient record.
    fn delete<S: Session + ?Sized>(&self, session: &S) -> Result<CommitOutcome, RecordError> {
        let descriptor = Self::entity_descriptor();
        let id = self.id().ok_or(RecordError::PrimaryKeyRequired)?;
        session.delete(descriptor.table_name, id)?;
        log::debug!("Deleting {} #{}", descriptor.type_name, id);
        commit::commit(session)
    }

    /// Mark the record deleted and save it; the row stays queryable.
    fn sdelete<S: Session + ?Sized>(
        &mut self,
        session: &S,
        commit: bool,
    ) -> Result<CommitOutcome, RecordError> {
        self.set_status(Status::Deleted);
        self.save(session, commit)
    }

    /// Mark the record active again and save it.
    fn restore<S: Session + ?Sized>(
        &mut self,
        session: &S,
        commit: bool,
    ) -> Result<CommitOutcome, RecordError> {
        self.set_status(Status::Active);
        self.save(session, commit)
    }

    /// Remove every row of this type and commit.
    fn purge<S: Session + ?Sized>(session: &S) -> Result<CommitOutcome, RecordError> {
        let descriptor = Self::entity_descriptor();
        session.delete_all(descriptor.table_name)?;
        log::debug!("Purging {}", descriptor.table_name);
        commit::commit(session)
    }

    /// Commit whatever the session has staged.
    fn commit<S: Session + ?Sized>(&self, session: &S) -> Result<CommitOutcome, RecordError> {
        commit::commit(session)
    }

    /// Release the session. The record itself is untouched.
    fn close<S: Session + ?Sized>(&self, session: &S) -> Result<(), RecordError> {
        session.close().map_err(RecordError::from)
    }

    /// Load one record by identity.
    fn find<S: Session + ?Sized>(session: &S, id: i64) -> Result<Option<Self>, RecordError> {
        let table = Self::entity_descriptor().table_name;
        guarded_query(session, table, |s| s.get(table, id))?
            .map(|row| Self::hydrate(id, row))
            .transpose()
    }

    /// Load every record of this type, ordered by identity.
    fn all<S: Session + ?Sized>(session: &S) -> Result<Vec<Self>, RecordError> {
        let table = Self::entity_descriptor().table_name;
        guarded_query(session, table, |s| s.all(table))?
            .into_iter()
            .map(|(id, row)| Self::hydrate(id, row))
            .collect()
    }

    /// Load the records whose columns equal every given filter value.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidField` when a filter names anything other
    /// than a declared column.
    fn filter_by<'a, S, I, F, V>(session: &S, filters: I) -> Result<Vec<Self>, RecordError>
    where
        S: Session + ?Sized,
        I: IntoIterator<Item = (F, V)>,
        F: Into<FieldRef<'a>>,
        V: Into<Value>,
    {
        let descriptor = Self::entity_descriptor();
        let filters = introspect::checked_filters(descriptor, filters)?;
        Ok(Self::all(session)?
            .into_iter()
            .filter(|record| {
                filters
                    .iter()
                    .all(|(name, value)| record.get(name).as_ref() == Some(value))
            })
            .collect())
    }

    /// Build an instance from a stored row.
    fn hydrate(id: i64, row: Row) -> Result<Self, RecordError> {
        let mut record = Self::default();
        record.set_id(Some(id));
        for (field, value) in row {
            record.set(&field, value)?;
        }
        Ok(record)
    }
}

/// Run a read, rolling back and retrying once after an operational failure.
fn guarded_query<S, T, Q>(session: &S, table: &'static str, query: Q) -> Result<T, RecordError>
where
    S: Session + ?Sized,
    Q: Fn(&S) -> Result<T, SessionError>,
{
    #[cfg(feature = "tracing")]
    let _span = tracing_helpers::query_span(table).entered();

    match query(session) {
        Err(SessionError::Operational(reason)) => {
            log::error!("Query on {} failed, rolling back and retrying: {}", table, reason);
            session.rollback()?;
            #[cfg(feature = "metrics")]
            METRICS.record_query_retry(table);
            query(session).map_err(RecordError::from)
        }
        result => result.map_err(RecordError::from),
    }
}
