//! Column definition metadata.
//!
//! `ColumnDefinition` describes one persisted column of an entity: its name,
//! declared type and the constraints the session enforces at commit time.
//! Definitions are `const`-constructible so `#[derive(Record)]` can emit the
//! whole field registry as a `static`.

/// Column definition metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Column name as stored
    pub name: &'static str,
    /// Declared type (the Rust field type unless overridden with `#[column_type]`)
    pub column_type: &'static str,
    /// Whether the column is the primary key
    pub primary_key: bool,
    /// Whether the column accepts null
    pub nullable: bool,
    /// Whether values must be unique across the table
    pub unique: bool,
    /// Whether the column is never serialized unless explicitly exposed
    pub protected: bool,
}

impl ColumnDefinition {
    /// A non-null, unconstrained column.
    pub const fn new(name: &'static str, column_type: &'static str) -> Self {
        Self {
            name,
            column_type,
            primary_key: false,
            nullable: false,
            unique: false,
            protected: false,
        }
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn protected(mut self) -> Self {
        self.protected = true;
        self
    }

    /// Human-readable label: underscores become spaces.
    pub fn display_name(&self) -> String {
        self.name.replace('_', " ")
    }
}
