//! # activebase
//!
//! Active-record base layer for entities mapped with `sea-query` values.
//!
//! `#[derive(Record)]` turns a plain struct into an entity with uniform
//! lifecycle operations (create, update, save, hard and soft delete, restore,
//! purge), field introspection, typed equality and a depth-bounded JSON
//! projection. Persistence goes through an explicit [`Session`]; every
//! commit passes through the [`commit`] coordinator, which absorbs
//! operational storage failures and escalates integrity violations.
//!
//! ```no_run
//! use activebase::registry::Registry;
//! use activebase::serializer::{prepare, PrepareOptions};
//! use activebase::session::MemorySession;
//! use activebase::{Entity, Patch, Record, Status};
//!
//! #[derive(Debug, Default, Record)]
//! #[table_name = "orders"]
//! struct Order {
//!     #[primary_key]
//!     id: Option<i64>,
//!     active: Status,
//!     total: f64,
//! }
//!
//! # fn main() -> Result<(), activebase::RecordError> {
//! let session = MemorySession::new();
//! Registry::new().register::<Order>().create_all(&session)?;
//!
//! let mut order = Order::create(Patch::new().set(Order::TOTAL, 42.0))?;
//! order.save(&session, true)?;
//! let data = prepare(&order, &PrepareOptions::default()).into_value();
//! assert_eq!(data["total"], 42.0);
//! # Ok(())
//! # }
//! ```

extern crate self as activebase;

pub mod active_model;
pub mod commit;
pub mod config;
pub mod descriptor;
pub mod introspect;
pub mod metrics;
pub mod query;
pub mod registry;
pub mod relation;
pub mod serializer;
pub mod session;
pub mod value;

pub use active_model::{Entity, Patch, Record, RecordError};
pub use activebase_derive::Record;
pub use commit::{commit, CommitOutcome};
pub use descriptor::EntityDescriptor;
pub use introspect::FieldRef;
pub use query::{Column, ColumnDefinition, ColumnTrait};
pub use relation::{Related, RelationDef, RelationType};
pub use session::{Session, SessionError};
pub use value::{Status, Value};
