//! Join descriptions consumed when rendering JOIN clauses.
//!
//! Two kinds of join share one interface:
//! - `RelationJoin`: column-to-column join between two known structures,
//!   validated against their metadata
//! - `CrossJoinInfo`: arbitrary raw SQL used as the join source, never
//!   validated and never bracketed

use std::sync::Arc;

use crate::error::OrmError;
use crate::query::RawExpr;
use crate::registry::ClassRegistry;
use crate::table::{JoinType, TableStructure};

/// Marker selecting every column of the foreign table.
pub const ALL_COLUMNS: &str = "*";

/// Any join that can be attached to a select.
#[derive(Debug, Clone)]
pub enum JoinInfo {
    Relation(RelationJoin),
    Cross(CrossJoinInfo),
}

impl JoinInfo {
    pub fn join_name(&self) -> &str {
        match self {
            JoinInfo::Relation(join) => &join.join_name,
            JoinInfo::Cross(join) => &join.join_name,
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            JoinInfo::Relation(join) => join.is_valid(),
            JoinInfo::Cross(join) => join.is_valid(),
        }
    }

    /// Restricts which foreign columns are projected.
    ///
    /// Cross joins have no known column list, so the call is ignored.
    pub fn set_foreign_columns_to_select<I, S>(&mut self, columns: I) -> Result<(), OrmError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self {
            JoinInfo::Relation(join) => join.set_foreign_columns_to_select(columns),
            JoinInfo::Cross(_) => Ok(()),
        }
    }

    /// Foreign columns projected by this join. Always empty for cross joins.
    pub fn foreign_columns_to_select(&self) -> &[String] {
        match self {
            JoinInfo::Relation(join) => join.foreign_columns.as_slice(),
            JoinInfo::Cross(_) => &[],
        }
    }
}

impl From<RelationJoin> for JoinInfo {
    fn from(join: RelationJoin) -> Self {
        JoinInfo::Relation(join)
    }
}

impl From<CrossJoinInfo> for JoinInfo {
    fn from(join: CrossJoinInfo) -> Self {
        JoinInfo::Cross(join)
    }
}

fn check_join_name(join_name: &str) -> Result<(), OrmError> {
    if join_name.trim().is_empty() {
        return Err(OrmError::InvalidArgument(
            "join name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Join between a column of one table and a column of another.
#[derive(Debug, Clone)]
pub struct RelationJoin {
    join_name: String,
    join_type: JoinType,
    local_table: Arc<TableStructure>,
    local_column: String,
    foreign_table: Arc<TableStructure>,
    foreign_column: String,
    foreign_columns: Vec<String>,
}

impl RelationJoin {
    /// Describes a join. Column existence is checked by `is_valid`.
    pub fn new(
        join_name: &str,
        local_table: Arc<TableStructure>,
        local_column: &str,
        join_type: JoinType,
        foreign_table: Arc<TableStructure>,
        foreign_column: &str,
    ) -> Result<Self, OrmError> {
        check_join_name(join_name)?;
        Ok(Self {
            join_name: join_name.to_string(),
            join_type,
            local_table,
            local_column: local_column.to_string(),
            foreign_table,
            foreign_column: foreign_column.to_string(),
            foreign_columns: Vec::new(),
        })
    }

    /// Builds the join declared by a relation of `local_table`.
    ///
    /// The join is named after the relation and the foreign structure is
    /// resolved through the registry.
    pub fn from_relation(
        registry: &ClassRegistry,
        local_table: &Arc<TableStructure>,
        relation_name: &str,
    ) -> Result<Self, OrmError> {
        let relation = local_table.get_relation(relation_name)?;
        let foreign_table = registry.get_table_structure(&relation.foreign_table)?;
        RelationJoin::new(
            &relation.name,
            Arc::clone(local_table),
            &relation.local_column,
            relation.join_type,
            foreign_table,
            &relation.foreign_column,
        )
    }

    pub fn join_name(&self) -> &str {
        &self.join_name
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn local_table(&self) -> &Arc<TableStructure> {
        &self.local_table
    }

    pub fn local_column(&self) -> &str {
        &self.local_column
    }

    pub fn foreign_table(&self) -> &Arc<TableStructure> {
        &self.foreign_table
    }

    pub fn foreign_column(&self) -> &str {
        &self.foreign_column
    }

    pub fn is_valid(&self) -> bool {
        !self.join_name.is_empty()
            && self.local_table.has_column(&self.local_column)
            && self.foreign_table.has_column(&self.foreign_column)
    }

    /// Restricts the projected foreign columns. `"*"` selects all of them.
    pub fn set_foreign_columns_to_select<I, S>(&mut self, columns: I) -> Result<(), OrmError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.iter().any(|c| c == ALL_COLUMNS) {
            self.foreign_columns = self
                .foreign_table
                .column_names()
                .map(str::to_string)
                .collect();
            return Ok(());
        }
        for column in &columns {
            self.foreign_table.get_column(column)?;
        }
        self.foreign_columns = columns;
        Ok(())
    }
}

/// Join whose source is a raw query expression (derived table, lateral
/// subquery, function call).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossJoinInfo {
    join_name: String,
    join_query: RawExpr,
}

impl CrossJoinInfo {
    /// Wraps `join_query` as a join source. Bracket wrapping is disabled so
    /// the expression is rendered verbatim.
    pub fn create(join_name: &str, join_query: RawExpr) -> Result<Self, OrmError> {
        check_join_name(join_name)?;
        Ok(Self {
            join_name: join_name.to_string(),
            join_query: join_query.wrap_in_brackets(false),
        })
    }

    pub fn join_name(&self) -> &str {
        &self.join_name
    }

    pub fn join_query(&self) -> &RawExpr {
        &self.join_query
    }

    /// Cross joins have no foreign-key shape to check.
    pub fn is_valid(&self) -> bool {
        true
    }

    /// The join source as it appears in the JOIN clause.
    pub fn join_source_sql(&self) -> String {
        self.join_query.to_sql()
    }
}
