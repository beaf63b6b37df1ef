//! Column definition within a table.

use serde_json::Value;

use crate::error::OrmError;
use crate::types::{ColumnType, ValueHandlerRegistry};

/// Column definition within a table.
///
/// Configured through the consuming builder methods, then owned by its
/// `TableStructure` and never modified again.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name
    name: String,
    /// Declared type
    column_type: ColumnType,
    /// Whether this is the table's primary key
    primary_key: bool,
    /// Whether the column stores a file attachment
    file: bool,
    /// Whether null is an accepted value
    nullable: bool,
    /// Value assigned to new records
    default_value: Option<Value>,
}

impl Column {
    /// Creates a column from a type name.
    ///
    /// # Arguments
    /// * `type_name` - Lowercase type name (e.g., "int", "bool", "file")
    /// * `name` - Column name
    ///
    /// # Returns
    /// `Result<Column, OrmError>`; `InvalidType` for unknown type names.
    pub fn create(type_name: &str, name: &str) -> Result<Self, OrmError> {
        let column_type = type_name.parse::<ColumnType>()?;
        Column::try_new(name, column_type)
    }

    /// Creates a column of the given type, rejecting empty names.
    pub fn try_new(name: &str, column_type: ColumnType) -> Result<Self, OrmError> {
        if name.trim().is_empty() {
            return Err(OrmError::InvalidArgument(
                "column name must not be empty".to_string(),
            ));
        }
        Ok(Column::new(name, column_type))
    }

    /// Creates a column of the given type.
    ///
    /// File and image columns are flagged as file columns.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            primary_key: false,
            file: column_type.is_file(),
            nullable: true,
            default_value: None,
        }
    }

    /// Marks the column as the primary key. Primary keys are not nullable.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Overrides the file-column flag.
    pub fn file(mut self, file: bool) -> Self {
        self.file = file;
        self
    }

    /// Sets nullability. Has no effect on primary keys.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable && !self.primary_key;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_file(&self) -> bool {
        self.file
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn get_default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Applies the type's value processor to a new value.
    pub fn process_new_value(
        &self,
        handlers: &ValueHandlerRegistry,
        value: Value,
    ) -> Result<Value, OrmError> {
        let process = handlers.processor_for(self.column_type)?;
        Ok(process(value))
    }

    /// Validates a processed value against nullability and the type's validator.
    pub fn validate_value(
        &self,
        handlers: &ValueHandlerRegistry,
        value: &Value,
    ) -> Result<(), OrmError> {
        if value.is_null() {
            if self.nullable {
                return Ok(());
            }
            return Err(OrmError::InvalidValue {
                column: self.name.clone(),
                reason: "null is not allowed".to_string(),
            });
        }
        let validate = handlers.validator_for(self.column_type)?;
        validate(value).map_err(|reason| OrmError::InvalidValue {
            column: self.name.clone(),
            reason,
        })
    }
}
