use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::OrmError;
use crate::table::TableStructure;
use crate::types::ValueHandlerRegistry;

/// Values of one row, keyed by column name.
///
/// Only the metadata side of a record lives here: values are processed and
/// validated by column type, persistence belongs to the executor.
#[derive(Debug, Clone)]
pub struct Record {
    structure: Arc<TableStructure>,
    handlers: Arc<ValueHandlerRegistry>,
    values: HashMap<String, Value>,
}

impl Record {
    pub(crate) fn new(structure: Arc<TableStructure>, handlers: Arc<ValueHandlerRegistry>) -> Self {
        let values = structure
            .columns()
            .iter()
            .filter_map(|c| {
                c.get_default_value()
                    .map(|v| (c.name().to_string(), v.clone()))
            })
            .collect();
        Self {
            structure,
            handlers,
            values,
        }
    }

    pub fn structure(&self) -> &Arc<TableStructure> {
        &self.structure
    }

    /// Sets a column value after running the column's processor and validator.
    ///
    /// # Returns
    /// `UnknownColumn` for columns not in the table, `InvalidValue` when the
    /// validator rejects the processed value. The record is unchanged on error.
    pub fn set(&mut self, column: &str, value: Value) -> Result<(), OrmError> {
        let definition = self.structure.get_column(column)?;
        let value = definition.process_new_value(&self.handlers, value)?;
        definition.validate_value(&self.handlers, &value)?;
        self.values.insert(column.to_string(), value);
        Ok(())
    }

    /// Gets a column value; `None` when it was never set and has no default.
    pub fn get(&self, column: &str) -> Result<Option<&Value>, OrmError> {
        self.structure.get_column(column)?;
        Ok(self.values.get(column))
    }

    pub fn has_value(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn pk_value(&self) -> Option<&Value> {
        self.structure
            .pk_column_name()
            .and_then(|name| self.values.get(name))
    }

    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }
}
