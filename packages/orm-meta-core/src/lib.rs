//! Metadata and query composition core for an object-relational mapper.
//!
//! Provides table structures (columns, primary keys, file columns,
//! relations), a registry resolving table names and aliases, join
//! descriptions including raw cross joins, and record sets pairing a query
//! with its target table.

pub mod config;
pub mod error;
pub mod join;
pub mod query;
pub mod record_set;
pub mod registry;
pub mod schema;
pub mod table;
pub mod types;

pub use error::OrmError;
pub use registry::ClassRegistry;
