//! Raw SQL expressions and structured selects.

use std::fmt;
use std::sync::Arc;

use crate::error::OrmError;
use crate::join::JoinInfo;
use crate::table::TableStructure;

/// Verbatim SQL fragment.
///
/// Rendered inside brackets unless wrapping is disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExpr {
    sql: String,
    wrap_in_brackets: bool,
}

impl RawExpr {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            wrap_in_brackets: true,
        }
    }

    pub fn wrap_in_brackets(mut self, wrap: bool) -> Self {
        self.wrap_in_brackets = wrap;
        self
    }

    pub fn is_wrapped_in_brackets(&self) -> bool {
        self.wrap_in_brackets
    }

    /// The fragment as given.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The fragment as it appears in a statement.
    pub fn to_sql(&self) -> String {
        if self.wrap_in_brackets {
            format!("({})", self.sql)
        } else {
            self.sql.clone()
        }
    }
}

impl fmt::Display for RawExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Structured select bound to the table it reads from.
///
/// Rendering and execution belong to the query builder; this type only
/// carries a validated description.
#[derive(Debug, Clone)]
pub struct Select {
    table: Arc<TableStructure>,
    columns: Vec<String>,
    joins: Vec<JoinInfo>,
    conditions: Vec<RawExpr>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl Select {
    /// Selects all columns of `table`.
    pub fn from_table(table: Arc<TableStructure>) -> Self {
        Self {
            table,
            columns: Vec::new(),
            joins: Vec::new(),
            conditions: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Restricts the projection. `UnknownColumn` for names not in the table.
    pub fn columns<I, S>(mut self, columns: I) -> Result<Self, OrmError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        for column in &columns {
            self.table.get_column(column)?;
        }
        self.columns = columns;
        Ok(self)
    }

    /// Adds a join. Invalid joins and relation joins starting from another
    /// table are rejected.
    pub fn join(mut self, join: JoinInfo) -> Result<Self, OrmError> {
        if let JoinInfo::Relation(relation_join) = &join {
            let local = relation_join.local_table();
            if !Arc::ptr_eq(local, &self.table) && **local != *self.table {
                return Err(OrmError::InvalidArgument(format!(
                    "join '{}' starts from table '{}', not '{}'",
                    join.join_name(),
                    local.table_name(),
                    self.table.table_name()
                )));
            }
        }
        if !join.is_valid() {
            return Err(OrmError::InvalidArgument(format!(
                "join '{}' is not valid",
                join.join_name()
            )));
        }
        if self.joins.iter().any(|j| j.join_name() == join.join_name()) {
            return Err(OrmError::InvalidArgument(format!(
                "join '{}' is already part of the select",
                join.join_name()
            )));
        }
        self.joins.push(join);
        Ok(self)
    }

    pub fn where_raw(mut self, condition: RawExpr) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Table the select is bound to.
    pub fn table(&self) -> &Arc<TableStructure> {
        &self.table
    }

    /// Projected columns. Empty means every column.
    pub fn selected_columns(&self) -> &[String] {
        &self.columns
    }

    pub fn joins(&self) -> &[JoinInfo] {
        &self.joins
    }

    pub fn conditions(&self) -> &[RawExpr] {
        &self.conditions
    }

    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn get_offset(&self) -> Option<usize> {
        self.offset
    }
}
