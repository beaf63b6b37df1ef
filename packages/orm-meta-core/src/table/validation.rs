//! Validation of table declarations.

use std::collections::HashMap;

use super::column::Column;
use super::relation::Relation;
use crate::error::OrmError;

/// Indexes columns by name, rejecting empty and duplicate names.
pub(crate) fn index_columns(
    table: &str,
    columns: &[Column],
) -> Result<HashMap<String, usize>, OrmError> {
    let mut index = HashMap::with_capacity(columns.len());
    for (position, column) in columns.iter().enumerate() {
        if column.name().trim().is_empty() {
            return Err(OrmError::InvalidArgument(format!(
                "column name must not be empty in table '{}'",
                table
            )));
        }
        if index.insert(column.name().to_string(), position).is_some() {
            return Err(OrmError::DuplicateColumn {
                table: table.to_string(),
                column: column.name().to_string(),
            });
        }
    }
    Ok(index)
}

/// Finds the primary key column, rejecting tables that declare several.
pub(crate) fn find_primary_key(
    table: &str,
    columns: &[Column],
) -> Result<Option<String>, OrmError> {
    let pk_columns: Vec<String> = columns
        .iter()
        .filter(|c| c.is_primary_key())
        .map(|c| c.name().to_string())
        .collect();

    match pk_columns.len() {
        0 => Ok(None),
        1 => Ok(pk_columns.into_iter().next()),
        _ => Err(OrmError::MultiplePrimaryKeys {
            table: table.to_string(),
            columns: pk_columns,
        }),
    }
}

/// Indexes relations by name after checking each one's local column exists.
pub(crate) fn index_relations(
    table: &str,
    relations: &[Relation],
    column_index: &HashMap<String, usize>,
) -> Result<HashMap<String, usize>, OrmError> {
    let mut index = HashMap::with_capacity(relations.len());
    for (position, relation) in relations.iter().enumerate() {
        if relation.name.trim().is_empty() {
            return Err(OrmError::InvalidArgument(format!(
                "relation name must not be empty in table '{}'",
                table
            )));
        }
        if !column_index.contains_key(&relation.local_column) {
            return Err(OrmError::unknown_column(table, &relation.local_column));
        }
        if index.insert(relation.name.clone(), position).is_some() {
            return Err(OrmError::DuplicateRelation {
                table: table.to_string(),
                relation: relation.name.clone(),
            });
        }
    }
    Ok(index)
}
