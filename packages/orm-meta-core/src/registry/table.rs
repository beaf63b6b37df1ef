use std::sync::Arc;

use super::record::Record;
use crate::query::Select;
use crate::table::TableStructure;
use crate::types::ValueHandlerRegistry;

/// Registered table: a structure plus the alias queries refer to it by.
#[derive(Debug, Clone)]
pub struct Table {
    structure: Arc<TableStructure>,
    alias: String,
    handlers: Arc<ValueHandlerRegistry>,
}

impl Table {
    pub(crate) fn new(
        structure: Arc<TableStructure>,
        alias: String,
        handlers: Arc<ValueHandlerRegistry>,
    ) -> Self {
        Self {
            structure,
            alias,
            handlers,
        }
    }

    pub fn name(&self) -> &str {
        self.structure.table_name()
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn structure(&self) -> &Arc<TableStructure> {
        &self.structure
    }

    /// Creates an empty record populated with column defaults.
    pub fn new_record(&self) -> Record {
        Record::new(Arc::clone(&self.structure), Arc::clone(&self.handlers))
    }

    /// Starts a select over every column of this table.
    pub fn select(&self) -> Select {
        Select::from_table(Arc::clone(&self.structure))
    }
}

/// Default alias for a table name: `user_orders` becomes `UserOrders`.
pub(crate) fn default_alias(table_name: &str) -> String {
    table_name
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
