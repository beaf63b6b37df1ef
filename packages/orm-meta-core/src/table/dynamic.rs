//! Table structures assembled at runtime (test doubles, schema files).

use std::sync::atomic::{AtomicU64, Ordering};

use super::column::Column;
use super::relation::Relation;
use super::structure::{ConnectionNames, TableStructure};
use crate::error::OrmError;
use crate::types::ColumnType;

static NEXT_DYNAMIC_ID: AtomicU64 = AtomicU64::new(1);

/// Column set accepted by `DynamicTableStructure::set_columns`.
#[derive(Debug, Clone)]
pub enum ColumnSpec {
    /// Bare names; every column becomes a non-key string column
    Names(Vec<String>),
    /// Name and type name pairs
    Typed(Vec<(String, String)>),
    /// Fully configured columns
    Columns(Vec<Column>),
}

impl From<Vec<&str>> for ColumnSpec {
    fn from(names: Vec<&str>) -> Self {
        ColumnSpec::Names(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ColumnSpec {
    fn from(names: &[&str]) -> Self {
        ColumnSpec::Names(names.iter().map(|n| n.to_string()).collect())
    }
}

impl From<Vec<(&str, &str)>> for ColumnSpec {
    fn from(pairs: Vec<(&str, &str)>) -> Self {
        ColumnSpec::Typed(
            pairs
                .into_iter()
                .map(|(name, type_name)| (name.to_string(), type_name.to_string()))
                .collect(),
        )
    }
}

impl From<Vec<(&str, ColumnType)>> for ColumnSpec {
    fn from(pairs: Vec<(&str, ColumnType)>) -> Self {
        ColumnSpec::Columns(
            pairs
                .into_iter()
                .map(|(name, column_type)| Column::new(name, column_type))
                .collect(),
        )
    }
}

impl From<Vec<Column>> for ColumnSpec {
    fn from(columns: Vec<Column>) -> Self {
        ColumnSpec::Columns(columns)
    }
}

/// Builder for structures that do not come from a `TableDefinition`.
#[derive(Debug, Clone)]
pub struct DynamicTableStructure {
    id: u64,
    table_name: String,
    connections: ConnectionNames,
    columns: Vec<Column>,
    relations: Vec<Relation>,
}

impl DynamicTableStructure {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            id: NEXT_DYNAMIC_ID.fetch_add(1, Ordering::Relaxed),
            table_name: table_name.into(),
            connections: ConnectionNames::default(),
            columns: Vec::new(),
            relations: Vec::new(),
        }
    }

    /// Process-unique id distinguishing dynamic structures in logs.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn connections(mut self, connections: ConnectionNames) -> Self {
        self.connections = connections;
        self
    }

    /// Replaces the entire column set.
    ///
    /// # Returns
    /// `InvalidType` if a typed pair names an unknown type,
    /// `InvalidArgument` for an empty column name.
    pub fn set_columns(mut self, spec: impl Into<ColumnSpec>) -> Result<Self, OrmError> {
        self.columns = match spec.into() {
            ColumnSpec::Names(names) => names
                .iter()
                .map(|name| Column::try_new(name, ColumnType::String))
                .collect::<Result<_, _>>()?,
            ColumnSpec::Typed(pairs) => pairs
                .iter()
                .map(|(name, type_name)| Column::create(type_name, name))
                .collect::<Result<_, _>>()?,
            ColumnSpec::Columns(columns) => columns,
        };
        Ok(self)
    }

    pub fn relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    /// Validates and builds the structure.
    pub fn build(self) -> Result<TableStructure, OrmError> {
        tracing::debug!(
            "Building dynamic structure #{} for table '{}'",
            self.id,
            self.table_name
        );
        TableStructure::new(
            &self.table_name,
            self.connections,
            self.columns,
            self.relations,
        )
    }
}
