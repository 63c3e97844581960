//! Active-record operations for entity types.
//!
//! This module provides the traits every entity implements and the pieces the
//! lifecycle operations are built from:
//!
//! - **Traits**: [`Record`] (object-safe field access, equality) and [`Entity`]
//!   (introspection, construction, `save`/`update`/`delete`/`sdelete`/`restore`/`purge`, queries)
//! - **Patch**: [`Patch`], the typed `field = value` payload for `create` and `update`
//! - **Error**: [`RecordError`] for operation errors
//!
//! # Examples
//!
//! ```no_run
//! use activebase::session::MemorySession;
//! use activebase::{Entity, Patch, Record, Status};
//!
//! #[derive(Debug, Default, Record)]
//! #[table_name = "users"]
//! struct User {
//!     #[primary_key]
//!     id: Option<i64>,
//!     active: Status,
//!     #[unique]
//!     email: String,
//!     #[protected]
//!     password: String,
//! }
//!
//! # fn main() -> Result<(), activebase::RecordError> {
//! let session = MemorySession::new();
//! let mut user = User::create(Patch::new().set("email", "a@example.com"))?;
//! // `id` and unknown fields are dropped, not rejected
//! user.update(&session, Patch::new().set("id", 99i64).set("nickname", "x"), true)?;
//! # Ok(())
//! # }
//! ```

// Core traits
pub mod traits;
#[doc(inline)]
pub use traits::{Entity, Record};

// Typed field payloads
pub mod patch;
#[doc(inline)]
pub use patch::Patch;

// Error types
pub mod error;
#[doc(inline)]
pub use error::RecordError;
