//! Relation type definitions.

/// Type of relationship between entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationType {
    /// One-to-one relationship
    HasOne,
    /// One-to-many relationship
    HasMany,
    /// Many-to-one relationship (`belongs_to`)
    BelongsTo,
}

impl RelationType {
    /// Whether the related side is a collection.
    pub fn is_many(self) -> bool {
        matches!(self, RelationType::HasMany)
    }
}

/// A declared relationship attribute of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationDef {
    /// Attribute name on the owning entity
    pub name: &'static str,
    pub rel_type: RelationType,
    /// Type name of the related entity
    pub target: &'static str,
}

impl RelationDef {
    pub const fn new(name: &'static str, rel_type: RelationType, target: &'static str) -> Self {
        Self {
            name,
            rel_type,
            target,
        }
    }
}
