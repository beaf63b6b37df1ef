//! Statically declared tables and the per-type structure cache.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::column::Column;
use super::relation::Relation;
use super::structure::{ConnectionNames, TableStructure};
use crate::config::OrmConfig;
use crate::error::OrmError;
use crate::registry::ClassRegistry;

/// Declaration of a concrete table type.
///
/// Implementors describe the table as data; the structure itself is built
/// once per type by the registry it is registered with.
///
/// ```
/// use orm_meta_core::config::OrmConfig;
/// use orm_meta_core::table::{Column, TableDefinition};
/// use orm_meta_core::types::ColumnType;
/// use orm_meta_core::ClassRegistry;
///
/// struct Users;
///
/// impl TableDefinition for Users {
///     const TABLE_NAME: &'static str = "users";
///
///     fn columns() -> Vec<Column> {
///         vec![
///             Column::new("id", ColumnType::Int).primary_key(),
///             Column::new("email", ColumnType::Email),
///         ]
///     }
/// }
///
/// let registry = ClassRegistry::builder(OrmConfig::default())
///     .register::<Users>()
///     .unwrap()
///     .build()
///     .unwrap();
/// ClassRegistry::install(registry);
///
/// let structure = Users::instance().unwrap();
/// assert_eq!(structure.pk_column_name(), Some("id"));
/// ```
pub trait TableDefinition: 'static {
    /// Table name
    const TABLE_NAME: &'static str;

    fn columns() -> Vec<Column>;

    fn relations() -> Vec<Relation> {
        Vec::new()
    }

    /// Read connection override (None = configured default)
    fn connection_name() -> Option<&'static str> {
        None
    }

    /// Write connection override (None = read connection)
    fn writable_connection_name() -> Option<&'static str> {
        None
    }

    fn schema() -> Option<&'static str> {
        None
    }

    /// Builds a fresh structure. Prefer `instance()` or a `StructureCache`.
    fn build(config: &OrmConfig) -> Result<TableStructure, OrmError> {
        let connections = ConnectionNames::resolve(
            config,
            Self::connection_name(),
            Self::writable_connection_name(),
            Self::schema(),
        );
        TableStructure::new(
            Self::TABLE_NAME,
            connections,
            Self::columns(),
            Self::relations(),
        )
    }

    /// Returns the canonical structure registered for this type in the
    /// installed registry.
    ///
    /// # Returns
    /// `InvalidUsage` if no registry is installed, `UnknownTable` if the
    /// type was not registered with it.
    fn instance() -> Result<Arc<TableStructure>, OrmError>
    where
        Self: Sized,
    {
        ClassRegistry::instance()?.structure_of::<Self>()
    }
}

/// Marker for structures assembled at runtime.
///
/// Dynamic structures are constructed directly through
/// `DynamicTableStructure`; asking any cache for this type fails.
pub struct DynamicTable;

impl TableDefinition for DynamicTable {
    const TABLE_NAME: &'static str = "";

    fn columns() -> Vec<Column> {
        Vec::new()
    }

    fn build(_config: &OrmConfig) -> Result<TableStructure, OrmError> {
        Err(unsupported())
    }

    fn instance() -> Result<Arc<TableStructure>, OrmError> {
        Err(unsupported())
    }
}

fn unsupported() -> OrmError {
    OrmError::UnsupportedOperation(
        "dynamic table structures are built directly, not through the structure cache"
            .to_string(),
    )
}

/// One structure per table type.
#[derive(Debug)]
pub struct StructureCache {
    config: OrmConfig,
    structures: RwLock<HashMap<TypeId, Arc<TableStructure>>>,
}

impl StructureCache {
    /// Creates an empty cache that builds structures with `config`.
    pub fn new(config: OrmConfig) -> Self {
        Self {
            config,
            structures: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &OrmConfig {
        &self.config
    }

    /// Returns the cached structure for `T`, building it on first access.
    ///
    /// Concurrent first accesses build exactly once: the build runs while
    /// the write lock is held and the map is re-checked after acquiring it.
    pub fn get_or_build<T: TableDefinition>(&self) -> Result<Arc<TableStructure>, OrmError> {
        let key = TypeId::of::<T>();
        {
            let structures = self.structures.read().map_err(|_| OrmError::LockPoisoned)?;
            if let Some(structure) = structures.get(&key) {
                tracing::trace!("Structure cache hit for table '{}'", T::TABLE_NAME);
                return Ok(Arc::clone(structure));
            }
        }

        let mut structures = self.structures.write().map_err(|_| OrmError::LockPoisoned)?;
        if let Some(structure) = structures.get(&key) {
            return Ok(Arc::clone(structure));
        }

        let structure = Arc::new(T::build(&self.config)?);
        structures.insert(key, Arc::clone(&structure));
        tracing::debug!("Cached structure for table '{}'", T::TABLE_NAME);
        Ok(structure)
    }

    /// Number of cached structures.
    pub fn len(&self) -> usize {
        self.structures.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
