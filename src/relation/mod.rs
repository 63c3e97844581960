//! Relation module for entity relationships.
//!
//! - has_one: One-to-one relationship
//! - belongs_to: Many-to-one relationship
//! - has_many: One-to-many relationship
//!
//! Relationship attributes are loaded by the mapping engine and held on the
//! entity as `Option<T>`, `Box<T>` or `Vec<T>`. They are never columns: the
//! field introspector removes them from an entity's keys, and the serializer
//! expands them at most one hop deep.

pub mod related;
pub mod types;

#[doc(inline)]
pub use related::{IntoRelated, Related, RelationError};
#[doc(inline)]
pub use types::{RelationDef, RelationType};
