//! Resolution of table names and aliases to structures, tables and records.
//!
//! A `ClassRegistry` is an ordinary value built once through
//! `ClassRegistryBuilder` and passed to whatever needs it. For code that
//! cannot thread it explicitly, one registry can be installed as the
//! process-wide instance; the first installation wins and lives for the
//! rest of the process.

mod record;
mod table;

pub use record::Record;
pub use table::Table;

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::config::OrmConfig;
use crate::error::OrmError;
use crate::schema::SchemaFile;
use crate::table::{StructureCache, TableDefinition, TableStructure};
use crate::types::{register_builtin_handlers, ValueHandlerRegistry};

static INSTANCE: OnceLock<ClassRegistry> = OnceLock::new();

/// Registry of every table known to the process.
#[derive(Debug)]
pub struct ClassRegistry {
    config: OrmConfig,
    handlers: Arc<ValueHandlerRegistry>,
    /// Table name to table
    tables: HashMap<String, Table>,
    /// Alias to table name
    aliases: HashMap<String, String>,
    /// Declared table type to table name
    types: HashMap<TypeId, String>,
}

impl ClassRegistry {
    pub fn builder(config: OrmConfig) -> ClassRegistryBuilder {
        ClassRegistryBuilder::new(config)
    }

    /// Installs `registry` as the process-wide instance.
    ///
    /// The first installation wins. Later registries are dropped and the
    /// active one is returned.
    pub fn install(registry: ClassRegistry) -> &'static ClassRegistry {
        let mut pending = Some(registry);
        let active = INSTANCE.get_or_init(|| pending.take().unwrap_or_default());
        if pending.is_some() {
            tracing::warn!("Class registry already installed, discarding new registry");
        } else {
            tracing::debug!("Installed class registry with {} tables", active.tables.len());
        }
        active
    }

    /// Returns the installed instance, running `init` only if none exists.
    ///
    /// Concurrent first callers all observe the single registry built by
    /// whichever `init` ran.
    pub fn get_or_install_with<F>(init: F) -> &'static ClassRegistry
    where
        F: FnOnce() -> ClassRegistry,
    {
        INSTANCE.get_or_init(|| {
            let registry = init();
            tracing::debug!("Installed class registry with {} tables", registry.tables.len());
            registry
        })
    }

    /// Returns the process-wide instance.
    ///
    /// # Returns
    /// `InvalidUsage` if no registry has been installed yet.
    pub fn instance() -> Result<&'static ClassRegistry, OrmError> {
        INSTANCE.get().ok_or_else(|| {
            OrmError::InvalidUsage(
                "no class registry installed; build one and call ClassRegistry::install".to_string(),
            )
        })
    }

    pub fn config(&self) -> &OrmConfig {
        &self.config
    }

    pub fn value_handlers(&self) -> &Arc<ValueHandlerRegistry> {
        &self.handlers
    }

    /// Registered table names, sorted.
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    fn lookup(&self, name: &str) -> Result<&Table, OrmError> {
        self.tables
            .get(name)
            .ok_or_else(|| OrmError::unknown_table(name))
    }

    /// Gets a table by name. `UnknownTable` if not registered.
    pub fn get_table_instance(&self, name: &str) -> Result<Table, OrmError> {
        self.lookup(name).cloned()
    }

    /// Gets a table by alias. `UnknownTable` if not registered.
    pub fn get_table_instance_by_alias(&self, alias: &str) -> Result<Table, OrmError> {
        let name = self
            .aliases
            .get(alias)
            .ok_or_else(|| OrmError::unknown_table(alias))?;
        self.get_table_instance(name)
    }

    /// Gets a table structure by name. `UnknownTable` if not registered.
    pub fn get_table_structure(&self, name: &str) -> Result<Arc<TableStructure>, OrmError> {
        self.lookup(name).map(|t| Arc::clone(t.structure()))
    }

    /// Creates an empty record for a table. `UnknownTable` if not registered.
    pub fn new_record_instance(&self, name: &str) -> Result<Record, OrmError> {
        self.lookup(name).map(Table::new_record)
    }

    /// Returns the structure registered for a table type.
    ///
    /// This is the same `Arc` that `get_table_structure(T::TABLE_NAME)`
    /// returns.
    ///
    /// # Returns
    /// `UnknownTable` if `T` was never registered, `InvalidUsage` if its
    /// table name is taken by a structure that was not built from `T`.
    pub fn structure_of<T: TableDefinition>(&self) -> Result<Arc<TableStructure>, OrmError> {
        match self.types.get(&TypeId::of::<T>()) {
            Some(name) => self.get_table_structure(name),
            None if self.tables.contains_key(T::TABLE_NAME) => Err(OrmError::InvalidUsage(
                format!(
                    "table '{}' is registered from another declaration",
                    T::TABLE_NAME
                ),
            )),
            None => Err(OrmError::unknown_table(T::TABLE_NAME)),
        }
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        let handlers = ValueHandlerRegistry::new();
        // Fresh registry: the lock cannot be poisoned
        let _ = register_builtin_handlers(&handlers);
        Self {
            config: OrmConfig::default(),
            handlers: Arc::new(handlers),
            tables: HashMap::new(),
            aliases: HashMap::new(),
            types: HashMap::new(),
        }
    }
}

/// Collects table registrations and validates them as a whole.
#[derive(Debug)]
pub struct ClassRegistryBuilder {
    config: OrmConfig,
    handlers: Option<Arc<ValueHandlerRegistry>>,
    cache: StructureCache,
    entries: Vec<Registration>,
}

#[derive(Debug)]
struct Registration {
    structure: Arc<TableStructure>,
    alias: Option<String>,
    /// Set for declared table types
    type_id: Option<TypeId>,
}

impl ClassRegistryBuilder {
    pub fn new(config: OrmConfig) -> Self {
        Self {
            cache: StructureCache::new(config.clone()),
            config,
            handlers: None,
            entries: Vec::new(),
        }
    }

    /// Uses `handlers` instead of a fresh registry with the built-in handlers.
    pub fn value_handlers(mut self, handlers: Arc<ValueHandlerRegistry>) -> Self {
        self.handlers = Some(handlers);
        self
    }

    fn push(mut self, registration: Registration) -> Result<Self, OrmError> {
        let name = registration.structure.table_name();
        if self
            .entries
            .iter()
            .any(|entry| entry.structure.table_name() == name)
        {
            return Err(OrmError::DuplicateTable {
                name: name.to_string(),
            });
        }
        tracing::debug!("Registering table '{}'", name);
        self.entries.push(registration);
        Ok(self)
    }

    fn push_declared<T: TableDefinition>(self, alias: Option<String>) -> Result<Self, OrmError> {
        let structure = self.cache.get_or_build::<T>()?;
        self.push(Registration {
            structure,
            alias,
            type_id: Some(TypeId::of::<T>()),
        })
    }

    /// Registers a declared table under its default alias.
    pub fn register<T: TableDefinition>(self) -> Result<Self, OrmError> {
        self.push_declared::<T>(None)
    }

    pub fn register_with_alias<T: TableDefinition>(self, alias: &str) -> Result<Self, OrmError> {
        self.push_declared::<T>(Some(alias.to_string()))
    }

    /// Registers a structure built at runtime.
    pub fn register_structure(
        self,
        structure: TableStructure,
        alias: Option<&str>,
    ) -> Result<Self, OrmError> {
        self.push(Registration {
            structure: Arc::new(structure),
            alias: alias.map(str::to_string),
            type_id: None,
        })
    }

    /// Registers every table declared in a schema file.
    pub fn register_schema_file(mut self, schema: &SchemaFile) -> Result<Self, OrmError> {
        for (structure, alias) in schema.to_structures(&self.config)? {
            self = self.push(Registration {
                structure: Arc::new(structure),
                alias,
                type_id: None,
            })?;
        }
        Ok(self)
    }

    /// Validates aliases and relation targets, then builds the registry.
    ///
    /// # Returns
    /// `InvalidArgument` for an alias used twice, `UnknownTable` /
    /// `UnknownColumn` for a relation pointing at a missing table or column.
    pub fn build(self) -> Result<ClassRegistry, OrmError> {
        let handlers = match self.handlers {
            Some(handlers) => handlers,
            None => {
                let handlers = ValueHandlerRegistry::new();
                register_builtin_handlers(&handlers)?;
                Arc::new(handlers)
            }
        };

        let mut tables = HashMap::with_capacity(self.entries.len());
        let mut aliases = HashMap::with_capacity(self.entries.len());
        let mut types = HashMap::new();
        for Registration {
            structure,
            alias,
            type_id,
        } in self.entries
        {
            let name = structure.table_name().to_string();
            if let Some(type_id) = type_id {
                types.insert(type_id, name.clone());
            }
            let alias = alias.unwrap_or_else(|| table::default_alias(&name));
            if aliases.insert(alias.clone(), name.clone()).is_some() {
                return Err(OrmError::InvalidArgument(format!(
                    "alias '{}' is used by more than one table",
                    alias
                )));
            }
            tables.insert(name, Table::new(structure, alias, Arc::clone(&handlers)));
        }

        validate_relations(&tables)?;

        tracing::debug!("Built class registry with {} tables", tables.len());
        Ok(ClassRegistry {
            config: self.config,
            handlers,
            tables,
            aliases,
            types,
        })
    }
}

/// Checks every relation points at a registered table and existing column.
fn validate_relations(tables: &HashMap<String, Table>) -> Result<(), OrmError> {
    for table in tables.values() {
        for relation in table.structure().relations() {
            let foreign = tables
                .get(&relation.foreign_table)
                .ok_or_else(|| OrmError::unknown_table(&relation.foreign_table))?;
            if !foreign.structure().has_column(&relation.foreign_column) {
                return Err(OrmError::unknown_column(
                    &relation.foreign_table,
                    &relation.foreign_column,
                ));
            }
        }
    }
    Ok(())
}
