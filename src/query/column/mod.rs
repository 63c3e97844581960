//! Column handles and metadata.
//!
//! # Structure
//!
//! - `definition`: per-column metadata stored in the entity descriptor
//! - `column_trait`: `ColumnTrait` for building filter expressions
//! - `Column`: the attribute-reference handle for one column of one table

pub mod column_trait;
pub mod definition;

pub use column_trait::ColumnTrait;
pub use definition::ColumnDefinition;

use sea_query::Iden;

/// Attribute-reference handle for a declared column.
///
/// Handles are interchangeable with plain names wherever a field reference is
/// accepted; they normalize to [`Column::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    table: &'static str,
    name: &'static str,
}

impl Column {
    pub const fn new(table: &'static str, name: &'static str) -> Self {
        Self { table, name }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Iden for Column {
    fn unquoted(&self) -> &str {
        self.name
    }
}

impl ColumnTrait for Column {}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}
