//! Macro implementations

pub mod record;

pub use record::derive_record;
