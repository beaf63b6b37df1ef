//! Record sets: a query paired with the table its rows belong to.
//!
//! A record set is only a description. Executing the query against the
//! table's connection and hydrating records is the executor's job.

use std::sync::Arc;

use crate::error::OrmError;
use crate::query::{RawExpr, Select};
use crate::registry::{ClassRegistry, Table};
use crate::table::TableStructure;

/// Query a record set is built from.
#[derive(Debug, Clone)]
pub enum RecordSetQuery {
    /// Plain SQL string
    Raw(String),
    /// Raw SQL expression
    Expr(RawExpr),
    /// Structured select, already bound to a table
    Select(Select),
}

impl From<&str> for RecordSetQuery {
    fn from(sql: &str) -> Self {
        RecordSetQuery::Raw(sql.to_string())
    }
}

impl From<String> for RecordSetQuery {
    fn from(sql: String) -> Self {
        RecordSetQuery::Raw(sql)
    }
}

impl From<RawExpr> for RecordSetQuery {
    fn from(expr: RawExpr) -> Self {
        RecordSetQuery::Expr(expr)
    }
}

impl From<Select> for RecordSetQuery {
    fn from(select: Select) -> Self {
        RecordSetQuery::Select(select)
    }
}

/// Table a raw query targets.
#[derive(Debug, Clone)]
pub enum TableArg {
    /// Table name, resolved through the registry
    Name(String),
    Structure(Arc<TableStructure>),
    Table(Table),
}

impl From<&str> for TableArg {
    fn from(name: &str) -> Self {
        TableArg::Name(name.to_string())
    }
}

impl From<String> for TableArg {
    fn from(name: String) -> Self {
        TableArg::Name(name)
    }
}

impl From<Arc<TableStructure>> for TableArg {
    fn from(structure: Arc<TableStructure>) -> Self {
        TableArg::Structure(structure)
    }
}

impl From<Table> for TableArg {
    fn from(table: Table) -> Self {
        TableArg::Table(table)
    }
}

impl From<&Table> for TableArg {
    fn from(table: &Table) -> Self {
        TableArg::Table(table.clone())
    }
}

/// Immutable (query, table) pair.
#[derive(Debug, Clone)]
pub struct RecordSet {
    query: RecordSetQuery,
    table: Arc<TableStructure>,
}

impl RecordSet {
    /// Pairs a query with its target table.
    ///
    /// A structured select always binds to its own table and `table` is
    /// ignored. Raw queries need an explicit, non-empty `table`; names are
    /// resolved through `registry`.
    ///
    /// # Returns
    /// `InvalidArgument` for an empty query or a missing/empty table,
    /// `UnknownTable` when a table name is not registered.
    pub fn create(
        registry: &ClassRegistry,
        query: impl Into<RecordSetQuery>,
        table: Option<TableArg>,
    ) -> Result<Self, OrmError> {
        let query = query.into();
        let table = match &query {
            RecordSetQuery::Select(select) => {
                if table.is_some() {
                    tracing::debug!(
                        "Ignoring explicit table for select bound to '{}'",
                        select.table().table_name()
                    );
                }
                Arc::clone(select.table())
            }
            RecordSetQuery::Raw(sql) => {
                check_raw_sql(sql)?;
                resolve_table(registry, table)?
            }
            RecordSetQuery::Expr(expr) => {
                check_raw_sql(expr.sql())?;
                resolve_table(registry, table)?
            }
        };

        Ok(Self { query, table })
    }

    pub fn query(&self) -> &RecordSetQuery {
        &self.query
    }

    pub fn table(&self) -> &Arc<TableStructure> {
        &self.table
    }

    /// SQL for raw queries; `None` for selects, which the builder renders.
    pub fn raw_sql(&self) -> Option<String> {
        match &self.query {
            RecordSetQuery::Raw(sql) => Some(sql.clone()),
            RecordSetQuery::Expr(expr) => Some(expr.to_sql()),
            RecordSetQuery::Select(_) => None,
        }
    }

    /// Connection the executor should run the query on.
    pub fn connection_name(&self, writable: bool) -> &str {
        self.table.connection_name(writable)
    }
}

fn check_raw_sql(sql: &str) -> Result<(), OrmError> {
    if sql.trim().is_empty() {
        return Err(OrmError::InvalidArgument(
            "record set query must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn resolve_table(
    registry: &ClassRegistry,
    table: Option<TableArg>,
) -> Result<Arc<TableStructure>, OrmError> {
    match table {
        None => Err(OrmError::InvalidArgument(
            "a table is required for raw record set queries".to_string(),
        )),
        Some(TableArg::Name(name)) if name.trim().is_empty() => Err(OrmError::InvalidArgument(
            "table name must not be empty".to_string(),
        )),
        Some(TableArg::Name(name)) => registry.get_table_structure(&name),
        Some(TableArg::Structure(structure)) => Ok(structure),
        Some(TableArg::Table(table)) => Ok(Arc::clone(table.structure())),
    }
}
