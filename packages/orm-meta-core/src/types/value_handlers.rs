use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use super::column_type::ColumnType;
use crate::error::OrmError;

/// Transforms a value before it is stored in a record.
pub type ValueProcessor = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Checks a processed value, returning the rejection reason on failure.
pub type ValueValidator = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

fn identity_processor() -> ValueProcessor {
    Arc::new(|value: Value| value)
}

fn accept_all_validator() -> ValueValidator {
    Arc::new(|_: &Value| -> Result<(), String> { Ok(()) })
}

/// Registry of value processors and validators keyed by column type.
///
/// Lookups never miss: types without a registered handler get an identity
/// processor and an accept-all validator.
#[derive(Default)]
pub struct ValueHandlerRegistry {
    processors: RwLock<HashMap<ColumnType, ValueProcessor>>,
    validators: RwLock<HashMap<ColumnType, ValueValidator>>,
}

impl std::fmt::Debug for ValueHandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueHandlerRegistry")
            .field("processors", &self.processor_types())
            .field("validators", &self.validator_types())
            .finish()
    }
}

impl ValueHandlerRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            processors: RwLock::new(HashMap::new()),
            validators: RwLock::new(HashMap::new()),
        }
    }

    /// Registers the processor for a column type, replacing any previous one.
    pub fn register_processor(
        &self,
        column_type: ColumnType,
        processor: impl Fn(Value) -> Value + Send + Sync + 'static,
    ) -> Result<(), OrmError> {
        let mut processors = self.processors.write().map_err(|_| OrmError::LockPoisoned)?;
        processors.insert(column_type, Arc::new(processor));
        Ok(())
    }

    /// Registers the validator for a column type, replacing any previous one.
    pub fn register_validator(
        &self,
        column_type: ColumnType,
        validator: impl Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    ) -> Result<(), OrmError> {
        let mut validators = self.validators.write().map_err(|_| OrmError::LockPoisoned)?;
        validators.insert(column_type, Arc::new(validator));
        Ok(())
    }

    /// Returns the processor registered for `column_type`, or identity.
    pub fn processor_for(&self, column_type: ColumnType) -> Result<ValueProcessor, OrmError> {
        let processors = self.processors.read().map_err(|_| OrmError::LockPoisoned)?;
        Ok(processors
            .get(&column_type)
            .cloned()
            .unwrap_or_else(identity_processor))
    }

    /// Returns the validator registered for `column_type`, or accept-all.
    pub fn validator_for(&self, column_type: ColumnType) -> Result<ValueValidator, OrmError> {
        let validators = self.validators.read().map_err(|_| OrmError::LockPoisoned)?;
        Ok(validators
            .get(&column_type)
            .cloned()
            .unwrap_or_else(accept_all_validator))
    }

    /// Checks if a dedicated processor is registered for the type.
    pub fn has_processor(&self, column_type: ColumnType) -> bool {
        match self.processors.read() {
            Ok(guard) => guard.contains_key(&column_type),
            Err(_) => false,
        }
    }

    /// Checks if a dedicated validator is registered for the type.
    pub fn has_validator(&self, column_type: ColumnType) -> bool {
        match self.validators.read() {
            Ok(guard) => guard.contains_key(&column_type),
            Err(_) => false,
        }
    }

    fn processor_types(&self) -> Vec<ColumnType> {
        match self.processors.read() {
            Ok(guard) => guard.keys().copied().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn validator_types(&self) -> Vec<ColumnType> {
        match self.validators.read() {
            Ok(guard) => guard.keys().copied().collect(),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntest::timeout;
    use serde_json::json;
    use std::panic::{self, AssertUnwindSafe};

    #[timeout(1000)]
    #[test]
    fn test_poisoned_lock_is_reported() {
        let registry = ValueHandlerRegistry::new();
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = registry.processors.write().unwrap();
            panic!("writer panicked");
        }));

        assert!(matches!(
            registry.processor_for(ColumnType::Bool),
            Err(OrmError::LockPoisoned)
        ));
        assert!(matches!(
            registry.register_processor(ColumnType::Bool, |v| v),
            Err(OrmError::LockPoisoned)
        ));

        // Validators live behind their own lock
        let validate = registry.validator_for(ColumnType::Bool).unwrap();
        assert!(validate(&json!("anything")).is_ok());
    }
}
