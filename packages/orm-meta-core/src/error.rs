//! Metadata and query composition error types.

use thiserror::Error;

/// Errors raised while declaring, resolving or composing table metadata.
///
/// All variants describe programming errors: they are raised at the point
/// of violation and never retried internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrmError {
    /// Malformed constructor input (wrong shape or empty value)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Column type name is not a recognized type
    #[error("Unknown column type '{type_name}'")]
    InvalidType { type_name: String },

    /// Column not found in table structure
    #[error("Column '{column}' not found in table '{table}'")]
    UnknownColumn { table: String, column: String },

    /// Relation not found in table structure
    #[error("Relation '{relation}' not found in table '{table}'")]
    UnknownRelation { table: String, relation: String },

    /// Table name or alias not registered
    #[error("Table '{name}' is not registered")]
    UnknownTable { name: String },

    /// Accessor called on something that cannot serve it
    #[error("Invalid usage: {0}")]
    InvalidUsage(String),

    /// Operation disallowed for this variant
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Column declared twice in one table
    #[error("Column '{column}' already exists in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    /// Relation declared twice in one table
    #[error("Relation '{relation}' already exists in table '{table}'")]
    DuplicateRelation { table: String, relation: String },

    /// Table registered twice in one registry
    #[error("Table '{name}' is already registered")]
    DuplicateTable { name: String },

    /// More than one column flagged as primary key
    #[error("Table '{table}' declares more than one primary key: {columns:?}")]
    MultiplePrimaryKeys { table: String, columns: Vec<String> },

    /// Value rejected by the column's validator
    #[error("Invalid value for column '{column}': {reason}")]
    InvalidValue { column: String, reason: String },

    /// Lock poisoned (RwLock poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,

    /// Schema declaration could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl OrmError {
    pub(crate) fn unknown_column(table: &str, column: &str) -> Self {
        Self::UnknownColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    pub(crate) fn unknown_table(name: &str) -> Self {
        Self::UnknownTable {
            name: name.to_string(),
        }
    }
}

impl From<serde_json::Error> for OrmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
