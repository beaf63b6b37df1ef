use serde_json::Value;

use super::column_type::ColumnType;
use super::value_handlers::ValueHandlerRegistry;
use crate::error::OrmError;

/// Coerces loosely typed input into a boolean.
///
/// Strings and numbers that do not map to a boolean are left untouched so
/// the validator can reject them.
fn bool_processor(value: Value) -> Value {
    match value {
        Value::String(ref s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Value::Bool(true),
            "0" | "false" | "no" | "off" | "" => Value::Bool(false),
            _ => value,
        },
        Value::Number(ref n) => match n.as_f64() {
            Some(f) => Value::Bool(f != 0.0),
            None => value,
        },
        other => other,
    }
}

fn bool_validator(value: &Value) -> Result<(), String> {
    match value {
        Value::Bool(_) | Value::Null => Ok(()),
        other => Err(format!("expected a boolean, got {}", other)),
    }
}

/// Registers all built-in value handlers.
///
/// Only boolean columns carry handlers; every other type passes values
/// through unchanged.
pub fn register_builtin_handlers(registry: &ValueHandlerRegistry) -> Result<(), OrmError> {
    registry.register_processor(ColumnType::Bool, bool_processor)?;
    registry.register_validator(ColumnType::Bool, bool_validator)?;
    Ok(())
}
