//! Named relations between tables.

use serde::{Deserialize, Serialize};

/// Cardinality of a relation as seen from the owning table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
}

/// SQL join flavor used when a relation is turned into a join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinType {
    Inner,
    #[default]
    Left,
    Right,
    Full,
}

impl JoinType {
    /// SQL keyword for the join.
    pub fn as_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL JOIN",
        }
    }
}

/// Foreign-key style link from one table to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Relation name, unique within the owning table
    pub name: String,
    /// Column in the owning table
    pub local_column: String,
    /// Name of the target table
    pub foreign_table: String,
    /// Column in the target table
    pub foreign_column: String,
    /// Cardinality
    pub kind: RelationKind,
    /// Join flavor used for this relation
    #[serde(default)]
    pub join_type: JoinType,
    /// Target column used as a human readable label
    #[serde(default)]
    pub display_column: Option<String>,
}

impl Relation {
    pub fn new(
        name: impl Into<String>,
        local_column: impl Into<String>,
        kind: RelationKind,
        foreign_table: impl Into<String>,
        foreign_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            local_column: local_column.into(),
            foreign_table: foreign_table.into(),
            foreign_column: foreign_column.into(),
            kind,
            join_type: JoinType::default(),
            display_column: None,
        }
    }

    pub fn join_type(mut self, join_type: JoinType) -> Self {
        self.join_type = join_type;
        self
    }

    pub fn display_column(mut self, column: impl Into<String>) -> Self {
        self.display_column = Some(column.into());
        self
    }
}
