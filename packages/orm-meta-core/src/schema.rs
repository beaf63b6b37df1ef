//! JSON declaration of table structures.
//!
//! Lets tables be described as data instead of `TableDefinition` impls:
//!
//! ```json
//! {
//!   "version": 1,
//!   "tables": {
//!     "orders": {
//!       "connection": "replica",
//!       "columns": [
//!         {"name": "id", "type": "int", "primary_key": true},
//!         {"name": "customer_id", "type": "int"}
//!       ],
//!       "relations": [
//!         {"name": "Customer", "local_column": "customer_id", "kind": "many_to_one",
//!          "foreign_table": "customers", "foreign_column": "id"}
//!       ]
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::OrmConfig;
use crate::error::OrmError;
use crate::table::{Column, ConnectionNames, DynamicTableStructure, Relation, TableStructure};

/// Highest schema version this crate understands.
pub const SCHEMA_VERSION: u32 = 1;

/// Schema file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Schema version
    pub version: u32,
    /// Table definitions by table name
    pub tables: BTreeMap<String, TableSchema>,
}

/// Table declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSchema {
    /// Read connection (None = configured default)
    #[serde(default)]
    pub connection: Option<String>,
    /// Write connection (None = read connection)
    #[serde(default)]
    pub writable_connection: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    /// Registry alias (None = PascalCase table name)
    #[serde(default)]
    pub alias: Option<String>,
    pub columns: Vec<ColumnSchema>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

/// Column declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    /// Type name, see `ColumnType`
    pub r#type: String,
    #[serde(default)]
    pub primary_key: bool,
    /// None = nullable unless primary key
    #[serde(default)]
    pub nullable: Option<bool>,
    /// None = derived from the type
    #[serde(default)]
    pub file: Option<bool>,
    #[serde(default)]
    pub default: Option<Value>,
}

impl ColumnSchema {
    fn to_column(&self) -> Result<Column, OrmError> {
        if self.primary_key && self.nullable == Some(true) {
            return Err(OrmError::InvalidArgument(format!(
                "primary key column '{}' cannot be nullable",
                self.name
            )));
        }
        let mut column = Column::create(&self.r#type, &self.name)?;
        if self.primary_key {
            column = column.primary_key();
        }
        if let Some(nullable) = self.nullable {
            column = column.nullable(nullable);
        }
        if let Some(file) = self.file {
            column = column.file(file);
        }
        if let Some(default) = &self.default {
            column = column.default_value(default.clone());
        }
        Ok(column)
    }
}

impl SchemaFile {
    /// Parses a schema file.
    ///
    /// # Returns
    /// `Serialization` for malformed JSON, `InvalidArgument` for an
    /// unsupported version. Column types are checked by `to_structures`.
    pub fn from_json_str(json: &str) -> Result<Self, OrmError> {
        let schema: SchemaFile = serde_json::from_str(json)?;
        if schema.version == 0 || schema.version > SCHEMA_VERSION {
            return Err(OrmError::InvalidArgument(format!(
                "unsupported schema version {} (supported: {})",
                schema.version, SCHEMA_VERSION
            )));
        }
        Ok(schema)
    }

    pub fn to_json_string(&self) -> Result<String, OrmError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds a structure for every table, paired with its declared alias.
    pub fn to_structures(
        &self,
        config: &OrmConfig,
    ) -> Result<Vec<(TableStructure, Option<String>)>, OrmError> {
        let mut structures = Vec::with_capacity(self.tables.len());
        for (name, table) in &self.tables {
            let columns = table
                .columns
                .iter()
                .map(ColumnSchema::to_column)
                .collect::<Result<Vec<_>, _>>()?;

            let connections = ConnectionNames::resolve(
                config,
                table.connection.as_deref(),
                table.writable_connection.as_deref(),
                table.schema.as_deref(),
            );

            let mut builder = DynamicTableStructure::new(name.as_str())
                .connections(connections)
                .set_columns(columns)?;
            for relation in &table.relations {
                builder = builder.relation(relation.clone());
            }

            structures.push((builder.build()?, table.alias.clone()));
        }
        Ok(structures)
    }
}
