//! In-process session engine.
//!
//! `MemorySession` keeps committed tables in memory and stages writes until
//! `commit`. Commit applies the staged operations to a copy of the tables,
//! enforces the declared `NOT NULL` and `UNIQUE` constraints, and only then
//! publishes the copy, so a failed commit leaves committed data untouched.
//!
//! Identity sequences are per table and are never rewound, not even by a
//! rollback.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use sea_query::Value;

use super::{Row, Session, SessionError};
use crate::descriptor::EntityDescriptor;
use crate::value::is_null;

impl<T> From<PoisonError<T>> for SessionError {
    fn from(err: PoisonError<T>) -> Self {
        SessionError::Other(format!("session lock poisoned: {err}"))
    }
}

/// Counters describing what a `MemorySession` has been asked to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Successful commits
    pub commits: usize,
    /// Commits that returned an error
    pub failed_commits: usize,
    pub rollbacks: usize,
    pub closes: usize,
    /// Reads served (`get` and `all`), failed ones included
    pub queries: usize,
}

#[derive(Debug, Clone)]
struct Table {
    /// `None` for tables created without an entity descriptor
    descriptor: Option<&'static EntityDescriptor>,
    rows: BTreeMap<i64, Row>,
}

impl Table {
    fn new(descriptor: Option<&'static EntityDescriptor>) -> Self {
        Self {
            descriptor,
            rows: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
enum Staged {
    Upsert {
        table: &'static str,
        id: i64,
        row: Row,
    },
    Delete {
        table: &'static str,
        id: i64,
    },
    DeleteAll {
        table: &'static str,
    },
}

impl Staged {
    fn table(&self) -> &'static str {
        match self {
            Staged::Upsert { table, .. } | Staged::Delete { table, .. } | Staged::DeleteAll { table } => {
                *table
            }
        }
    }

    fn apply(&self, rows: &mut BTreeMap<i64, Row>) {
        match self {
            Staged::Upsert { id, row, .. } => {
                rows.insert(*id, row.clone());
            }
            Staged::Delete { id, .. } => {
                rows.remove(id);
            }
            Staged::DeleteAll { .. } => rows.clear(),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    tables: BTreeMap<&'static str, Table>,
    staged: Vec<Staged>,
    sequences: BTreeMap<&'static str, i64>,
    commit_faults: VecDeque<SessionError>,
    query_faults: VecDeque<SessionError>,
    stats: SessionStats,
}

impl State {
    fn next_id(&mut self, table: &'static str) -> i64 {
        let seq = self.sequences.entry(table).or_insert(0);
        *seq += 1;
        *seq
    }

    /// Keep generated ids above an id the caller assigned.
    fn reserve_id(&mut self, table: &'static str, id: i64) {
        let seq = self.sequences.entry(table).or_insert(0);
        *seq = (*seq).max(id);
    }

    /// Committed rows of `table` with this session's staged work laid over them.
    fn visible_rows(&self, table: &'static str) -> Result<BTreeMap<i64, Row>, SessionError> {
        let mut rows = self
            .tables
            .get(table)
            .map(|t| t.rows.clone())
            .ok_or_else(|| no_such_table(table))?;
        for op in self.staged.iter().filter(|op| op.table() == table) {
            op.apply(&mut rows);
        }
        Ok(rows)
    }

    fn take_query_fault(&mut self) -> Result<(), SessionError> {
        self.stats.queries += 1;
        match self.query_faults.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Apply staged work to a copy of the tables and validate the result.
    fn flush(&self) -> Result<BTreeMap<&'static str, Table>, SessionError> {
        let mut tables = self.tables.clone();
        for op in &self.staged {
            let table = tables
                .get_mut(op.table())
                .ok_or_else(|| no_such_table(op.table()))?;
            if let (Staged::Upsert { row, .. }, Some(descriptor)) = (op, table.descriptor) {
                check_not_null(descriptor, row)?;
            }
            op.apply(&mut table.rows);
        }
        for table in tables.values() {
            if let Some(descriptor) = table.descriptor {
                check_unique(descriptor, &table.rows)?;
            }
        }
        Ok(tables)
    }
}

fn no_such_table(table: &str) -> SessionError {
    SessionError::Operational(format!("no such table: {table}"))
}

fn check_not_null(descriptor: &EntityDescriptor, row: &Row) -> Result<(), SessionError> {
    for column in descriptor.columns.iter().filter(|c| !c.nullable && !c.primary_key) {
        if row.get(column.name).map_or(true, is_null) {
            return Err(SessionError::Integrity(format!(
                "NOT NULL constraint failed: {}.{}",
                descriptor.table_name, column.name
            )));
        }
    }
    Ok(())
}

fn check_unique(descriptor: &EntityDescriptor, rows: &BTreeMap<i64, Row>) -> Result<(), SessionError> {
    for column in descriptor.columns.iter().filter(|c| c.unique) {
        let mut seen: Vec<&Value> = Vec::new();
        for value in rows.values().filter_map(|row| row.get(column.name)) {
            if is_null(value) {
                continue;
            }
            if seen.contains(&value) {
                return Err(SessionError::Integrity(format!(
                    "UNIQUE constraint failed: {}.{}",
                    descriptor.table_name, column.name
                )));
            }
            seen.push(value);
        }
    }
    Ok(())
}

/// In-memory implementation of [`Session`].
///
/// Tables must exist before a commit touches them: register entities with
/// [`Session::create_all`] (usually through a
/// [`Registry`](crate::registry::Registry)) or create untyped tables with
/// [`MemorySession::create_table`]. Committing into a missing table is an
/// operational failure, mirroring a database without the schema.
///
/// A closed session can be used again; closing only discards staged work.
#[derive(Debug, Default)]
pub struct MemorySession {
    state: Mutex<State>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create an unconstrained table; a no-op if it already exists.
    pub fn create_table(&self, table: &'static str) {
        self.lock().tables.entry(table).or_insert_with(|| Table::new(None));
    }

    pub fn has_table(&self, table: &str) -> bool {
        self.lock().tables.contains_key(table)
    }

    /// Drop a table and everything in it, committed or staged.
    pub fn drop_table(&self, table: &str) {
        let mut state = self.lock();
        state.tables.remove(table);
        state.staged.retain(|op| op.table() != table);
    }

    /// Make the next `commit` fail with `err` without applying anything.
    pub fn fail_next_commit(&self, err: SessionError) {
        self.lock().commit_faults.push_back(err);
    }

    /// Make the next read (`get` or `all`) fail with `err`.
    pub fn fail_next_query(&self, err: SessionError) {
        self.lock().query_faults.push_back(err);
    }

    /// Committed rows of `table` only, ignoring staged work.
    pub fn committed(&self, table: &str) -> Vec<(i64, Row)> {
        self.lock()
            .tables
            .get(table)
            .map(|t| t.rows.iter().map(|(id, row)| (*id, row.clone())).collect())
            .unwrap_or_default()
    }

    /// Number of staged, uncommitted operations.
    pub fn staged_len(&self) -> usize {
        self.lock().staged.len()
    }

    pub fn stats(&self) -> SessionStats {
        self.lock().stats
    }
}

impl Session for MemorySession {
    fn add(&self, table: &'static str, id: Option<i64>, row: Row) -> Result<i64, SessionError> {
        let mut state = self.state.lock()?;
        let id = match id {
            Some(id) => {
                state.reserve_id(table, id);
                id
            }
            None => state.next_id(table),
        };
        state.staged.push(Staged::Upsert { table, id, row });
        Ok(id)
    }

    fn delete(&self, table: &'static str, id: i64) -> Result<(), SessionError> {
        self.state.lock()?.staged.push(Staged::Delete { table, id });
        Ok(())
    }

    fn delete_all(&self, table: &'static str) -> Result<(), SessionError> {
        self.state.lock()?.staged.push(Staged::DeleteAll { table });
        Ok(())
    }

    fn commit(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock()?;
        if let Some(err) = state.commit_faults.pop_front() {
            state.stats.failed_commits += 1;
            return Err(err);
        }
        match state.flush() {
            Ok(tables) => {
                state.tables = tables;
                state.staged.clear();
                state.stats.commits += 1;
                Ok(())
            }
            Err(err) => {
                // staged work stays until the caller rolls back
                state.stats.failed_commits += 1;
                Err(err)
            }
        }
    }

    fn rollback(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock()?;
        state.staged.clear();
        state.stats.rollbacks += 1;
        Ok(())
    }

    fn close(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock()?;
        state.staged.clear();
        state.stats.closes += 1;
        Ok(())
    }

    fn get(&self, table: &'static str, id: i64) -> Result<Option<Row>, SessionError> {
        let mut state = self.state.lock()?;
        state.take_query_fault()?;
        Ok(state.visible_rows(table)?.remove(&id))
    }

    fn all(&self, table: &'static str) -> Result<Vec<(i64, Row)>, SessionError> {
        let mut state = self.state.lock()?;
        state.take_query_fault()?;
        Ok(state.visible_rows(table)?.into_iter().collect())
    }

    fn create_all(&self, descriptors: &[&'static EntityDescriptor]) -> Result<(), SessionError> {
        let mut state = self.state.lock()?;
        for descriptor in descriptors {
            state
                .tables
                .entry(descriptor.table_name)
                .or_insert_with(|| Table::new(Some(*descriptor)));
        }
        Ok(())
    }
}
