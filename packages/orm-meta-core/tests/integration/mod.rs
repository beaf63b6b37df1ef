//! Integration test suite.
//!
//! Exercises the public API end to end:
//! 1. Table definitions and registry resolution
//! 2. Joins built from relations and raw expressions
//! 3. Record sets over raw queries and selects
//! 4. Registries loaded from schema files

pub mod helpers;
pub mod join_tests;
pub mod metadata_tests;
pub mod record_set_tests;
pub mod schema_tests;
