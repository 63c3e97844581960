//! Procedural macros for activebase
//!
//! This crate provides the `Record` derive macro.

mod attributes;
mod macros;
mod utils;

use proc_macro::TokenStream;

/// Derive macro for `Record` - turns a struct into an activebase entity
///
/// This macro generates:
/// - The `EntityDescriptor` field registry (columns and relationships)
/// - `Record` and `Entity` implementations
/// - A `Column` handle constant per column, e.g. `Order::TOTAL`
///
/// Struct attributes:
/// - `#[table_name = "..."]` - storage table (defaults to the snake_case type name)
///
/// Field attributes:
/// - `#[primary_key]` - allowed on `id` only, which is always the primary key
/// - `#[unique]`, `#[nullable]`, `#[protected]` - column constraints; `Option<T>` fields are nullable
/// - `#[column_type = "..."]` - declared type override
/// - `#[has_one]`, `#[has_many]`, `#[belongs_to]` - relationship attributes, never columns
/// - `#[skip]` - neither column nor relationship
///
/// # Example
///
/// ```ignore
/// use activebase::{Record, Status};
///
/// #[derive(Debug, Default, Record)]
/// #[table_name = "orders"]
/// pub struct Order {
///     #[primary_key]
///     pub id: Option<i64>,
///     pub active: Status,
///     pub total: f64,
///     #[has_many]
///     pub lines: Vec<OrderLine>,
/// }
/// ```
#[proc_macro_derive(
    Record,
    attributes(
        table_name,
        primary_key,
        unique,
        nullable,
        protected,
        column_type,
        has_one,
        has_many,
        belongs_to,
        skip
    )
)]
pub fn derive_record(input: TokenStream) -> TokenStream {
    macros::derive_record(input)
}
