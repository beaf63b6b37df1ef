//! Shared table definitions for integration tests.

use orm_meta_core::config::OrmConfig;
use orm_meta_core::table::{Column, JoinType, Relation, RelationKind, TableDefinition};
use orm_meta_core::types::ColumnType;
use orm_meta_core::ClassRegistry;
use serde_json::json;

pub struct Customers;

impl TableDefinition for Customers {
    const TABLE_NAME: &'static str = "customers";

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id", ColumnType::Int).primary_key(),
            Column::new("name", ColumnType::String),
            Column::new("email", ColumnType::Email),
            Column::new("avatar", ColumnType::Image),
            Column::new("is_active", ColumnType::Bool).default_value(json!(true)),
        ]
    }

    fn relations() -> Vec<Relation> {
        vec![Relation::new(
            "Orders",
            "id",
            RelationKind::OneToMany,
            "orders",
            "customer_id",
        )]
    }
}

pub struct Orders;

impl TableDefinition for Orders {
    const TABLE_NAME: &'static str = "orders";

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id", ColumnType::Int).primary_key(),
            Column::new("customer_id", ColumnType::Int).nullable(false),
            Column::new("total", ColumnType::Float),
            Column::new("invoice", ColumnType::File),
            Column::new("created_at", ColumnType::TimestampTz),
        ]
    }

    fn relations() -> Vec<Relation> {
        vec![Relation::new(
            "Customer",
            "customer_id",
            RelationKind::ManyToOne,
            "customers",
            "id",
        )
        .join_type(JoinType::Inner)
        .display_column("name")]
    }

    fn writable_connection_name() -> Option<&'static str> {
        Some("primary")
    }

    fn schema() -> Option<&'static str> {
        Some("sales")
    }
}

/// Registry holding `customers` and `orders`.
pub fn create_registry() -> anyhow::Result<ClassRegistry> {
    create_registry_with(OrmConfig::default())
}

pub fn create_registry_with(config: OrmConfig) -> anyhow::Result<ClassRegistry> {
    let registry = ClassRegistry::builder(config)
        .register::<Customers>()?
        .register_with_alias::<Orders>("Purchases")?
        .build()?;
    Ok(registry)
}

/// Installs the process-wide registry, reading from the `replica` connection.
pub fn installed_registry() -> &'static ClassRegistry {
    ClassRegistry::get_or_install_with(|| {
        let config = OrmConfig {
            default_connection: "replica".to_string(),
            ..OrmConfig::default()
        };
        create_registry_with(config).expect("Failed to build installed registry")
    })
}
