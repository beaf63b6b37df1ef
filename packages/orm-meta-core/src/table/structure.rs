//! Table structure metadata.
//!
//! A structure is the authoritative description of a table's shape:
//! - Connection names for reads and writes, and the optional schema
//! - Columns in declaration order, at most one of them the primary key
//! - Named relations to other tables
//!
//! Structures are immutable once built and shared behind `Arc`.

use std::collections::HashMap;

use super::column::Column;
use super::relation::Relation;
use super::validation;
use crate::config::OrmConfig;
use crate::error::OrmError;

/// Read and write connection names plus the schema a table lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionNames {
    pub read: String,
    pub write: String,
    pub schema: Option<String>,
}

impl ConnectionNames {
    /// Resolves per-table overrides against the configured defaults.
    ///
    /// When only the read connection is overridden, writes go to it too.
    pub fn resolve(
        config: &OrmConfig,
        read: Option<&str>,
        write: Option<&str>,
        schema: Option<&str>,
    ) -> Self {
        let read_name = read.unwrap_or(&config.default_connection).to_string();
        let write_name = match (write, read) {
            (Some(write), _) => write.to_string(),
            (None, Some(read)) => read.to_string(),
            (None, None) => config.writable_connection().to_string(),
        };
        Self {
            read: read_name,
            write: write_name,
            schema: schema
                .map(str::to_string)
                .or_else(|| config.default_schema.clone()),
        }
    }
}

impl Default for ConnectionNames {
    fn default() -> Self {
        ConnectionNames::resolve(&OrmConfig::default(), None, None, None)
    }
}

/// Table structure metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStructure {
    /// Table name
    table_name: String,
    /// Connection names and schema
    connections: ConnectionNames,
    /// Column definitions in declaration order
    columns: Vec<Column>,
    /// Column name to position in `columns`
    column_index: HashMap<String, usize>,
    /// Name of the primary key column
    pk_column_name: Option<String>,
    /// Relation definitions in declaration order
    relations: Vec<Relation>,
    /// Relation name to position in `relations`
    relation_index: HashMap<String, usize>,
}

impl TableStructure {
    /// Builds a validated table structure.
    ///
    /// # Arguments
    /// * `table_name` - Table name, must not be empty
    /// * `connections` - Connection names and schema
    /// * `columns` - Column definitions, unique by name
    /// * `relations` - Relation definitions, unique by name
    ///
    /// # Returns
    /// `Result<TableStructure, OrmError>`: `DuplicateColumn`,
    /// `MultiplePrimaryKeys`, `DuplicateRelation` or `UnknownColumn` (for a
    /// relation whose local column is missing) on invalid input.
    pub fn new(
        table_name: &str,
        connections: ConnectionNames,
        columns: Vec<Column>,
        relations: Vec<Relation>,
    ) -> Result<Self, OrmError> {
        if table_name.trim().is_empty() {
            return Err(OrmError::InvalidArgument(
                "table name must not be empty".to_string(),
            ));
        }

        let column_index = validation::index_columns(table_name, &columns)?;
        let pk_column_name = validation::find_primary_key(table_name, &columns)?;
        let relation_index = validation::index_relations(table_name, &relations, &column_index)?;

        tracing::debug!(
            "Built structure for table '{}' ({} columns, {} relations)",
            table_name,
            columns.len(),
            relations.len()
        );

        Ok(Self {
            table_name: table_name.to_string(),
            connections,
            columns,
            column_index,
            pk_column_name,
            relations,
            relation_index,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn schema(&self) -> Option<&str> {
        self.connections.schema.as_deref()
    }

    /// Returns the connection name for reads, or for writes when `writable`.
    pub fn connection_name(&self, writable: bool) -> &str {
        if writable {
            &self.connections.write
        } else {
            &self.connections.read
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index.contains_key(name)
    }

    /// Gets a column by name.
    ///
    /// # Returns
    /// `Result<&Column, OrmError>`; `UnknownColumn` if absent.
    pub fn get_column(&self, name: &str) -> Result<&Column, OrmError> {
        self.column_index
            .get(name)
            .map(|&position| &self.columns[position])
            .ok_or_else(|| OrmError::unknown_column(&self.table_name, name))
    }

    /// Returns all columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn has_pk_column(&self) -> bool {
        self.pk_column_name
            .as_deref()
            .is_some_and(|name| self.has_column(name))
    }

    /// Gets the primary key column, if the table has one.
    pub fn pk_column(&self) -> Option<&Column> {
        self.pk_column_name
            .as_deref()
            .and_then(|name| self.get_column(name).ok())
    }

    pub fn pk_column_name(&self) -> Option<&str> {
        self.pk_column_name.as_deref()
    }

    pub fn has_file_column(&self, name: &str) -> bool {
        self.get_column(name).is_ok_and(Column::is_file)
    }

    /// Returns columns holding file attachments, in declaration order.
    pub fn file_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_file()).collect()
    }

    pub fn has_relation(&self, name: &str) -> bool {
        self.relation_index.contains_key(name)
    }

    /// Gets a relation by name.
    ///
    /// # Returns
    /// `Result<&Relation, OrmError>`; `UnknownRelation` if absent.
    pub fn get_relation(&self, name: &str) -> Result<&Relation, OrmError> {
        self.relation_index
            .get(name)
            .map(|&position| &self.relations[position])
            .ok_or_else(|| OrmError::UnknownRelation {
                table: self.table_name.clone(),
                relation: name.to_string(),
            })
    }

    /// Returns all relations in declaration order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }
}
