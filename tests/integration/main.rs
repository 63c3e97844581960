//! Integration tests for the record lifecycle, commit policy, queries and
//! serialization, run against `MemorySession`.

mod common;

mod commit_failures;
mod lifecycle;
mod queries;
