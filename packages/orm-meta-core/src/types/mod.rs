//! Column types and type-keyed value handlers.

mod builtin_handlers;
mod column_type;
mod value_handlers;

pub use builtin_handlers::register_builtin_handlers;
pub use column_type::ColumnType;
pub use value_handlers::{ValueHandlerRegistry, ValueProcessor, ValueValidator};
