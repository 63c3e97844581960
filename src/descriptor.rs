//! Per-entity field registry.
//!
//! Every entity type owns one `EntityDescriptor`, normally emitted as a `static`
//! by `#[derive(Record)]`. It is the only source the introspector, the
//! serializer and the session consult for column and relationship metadata.

use crate::query::{Column, ColumnDefinition};
use crate::relation::RelationDef;

/// Name of the identity column every entity carries.
pub const PRIMARY_KEY: &str = "id";

/// Name of the soft-delete status column every entity carries.
pub const STATUS_COLUMN: &str = "active";

/// Static description of an entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Rust type name, used in error messages
    pub type_name: &'static str,
    /// Storage table
    pub table_name: &'static str,
    /// Persisted columns in declaration order
    pub columns: &'static [ColumnDefinition],
    /// Relationship attributes in declaration order
    pub relations: &'static [RelationDef],
}

impl EntityDescriptor {
    pub const fn new(
        type_name: &'static str,
        table_name: &'static str,
        columns: &'static [ColumnDefinition],
        relations: &'static [RelationDef],
    ) -> Self {
        Self {
            type_name,
            table_name,
            columns,
            relations,
        }
    }

    /// Look up a declared column by name.
    pub fn column(&self, name: &str) -> Option<&'static ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a declared relationship by name.
    pub fn relation(&self, name: &str) -> Option<&'static RelationDef> {
        self.relations.iter().find(|r| r.name == name)
    }

    pub fn is_relation(&self, name: &str) -> bool {
        self.relation(name).is_some()
    }

    /// Attribute handle for a declared column.
    pub fn handle(&self, name: &str) -> Option<Column> {
        self.column(name).map(|c| Column::new(self.table_name, c.name))
    }

    /// Names of columns declared `#[protected]`.
    pub fn protected_columns(&self) -> impl Iterator<Item = &'static str> {
        self.columns.iter().filter(|c| c.protected).map(|c| c.name)
    }
}
