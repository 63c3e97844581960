//! Query-side building blocks shared by entities.
//!
//! Only column handles live here; query execution belongs to the session.

pub mod column;

#[doc(inline)]
pub use column::{Column, ColumnDefinition, ColumnTrait};
