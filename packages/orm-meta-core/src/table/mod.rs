//! Table structures, column definitions, and relation management.

mod column;
mod definition;
mod dynamic;
mod relation;
mod structure;
pub(crate) mod validation;

pub use column::Column;
pub use definition::{DynamicTable, StructureCache, TableDefinition};
pub use dynamic::{ColumnSpec, DynamicTableStructure};
pub use relation::{JoinType, Relation, RelationKind};
pub use structure::{ConnectionNames, TableStructure};
