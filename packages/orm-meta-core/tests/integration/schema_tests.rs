//! Registries built from schema files mixed with declared tables.

use ntest::timeout;

use orm_meta_core::config::OrmConfig;
use orm_meta_core::join::RelationJoin;
use orm_meta_core::schema::SchemaFile;
use orm_meta_core::types::ColumnType;
use orm_meta_core::{ClassRegistry, OrmError};

use super::helpers::{Customers, Orders};

const INVOICES: &str = r#"{
    "version": 1,
    "tables": {
        "invoices": {
            "columns": [
                {"name": "id", "type": "int", "primary_key": true},
                {"name": "customer_id", "type": "int"},
                {"name": "pdf", "type": "file"},
                {"name": "is_paid", "type": "bool", "default": false}
            ],
            "relations": [
                {"name": "Customer", "local_column": "customer_id", "kind": "many_to_one",
                 "foreign_table": "customers", "foreign_column": "id"}
            ]
        }
    }
}"#;

#[timeout(1000)]
#[test]
fn test_schema_file_registry() -> anyhow::Result<()> {
    let config = OrmConfig::from_json_str(r#"{"default_connection": "main", "default_schema": "billing"}"#)?;
    let schema = SchemaFile::from_json_str(INVOICES)?;

    let registry = ClassRegistry::builder(config)
        .register_schema_file(&schema)?
        .build();
    // Relation target is not registered yet
    assert!(matches!(registry, Err(OrmError::UnknownTable { ref name }) if name == "customers"));

    let config = OrmConfig::from_json_str(r#"{"default_connection": "main", "default_schema": "billing"}"#)?;
    let registry = ClassRegistry::builder(config)
        .register::<Customers>()?
        .register::<Orders>()?
        .register_schema_file(&schema)?
        .build()?;

    let invoices = registry.get_table_structure("invoices")?;
    assert_eq!(invoices.connection_name(false), "main");
    assert_eq!(invoices.connection_name(true), "main");
    assert_eq!(invoices.schema(), Some("billing"));
    assert_eq!(invoices.get_column("pdf")?.column_type(), ColumnType::File);
    assert!(invoices.has_file_column("pdf"));

    // Declared tables pick up the registry configuration too
    let customers = registry.get_table_structure("customers")?;
    assert_eq!(customers.connection_name(false), "main");

    let join = RelationJoin::from_relation(&registry, &invoices, "Customer")?;
    assert!(join.is_valid());

    let record = registry.new_record_instance("invoices")?;
    assert_eq!(record.get("is_paid")?, Some(&serde_json::json!(false)));
    assert_eq!(registry.get_table_instance_by_alias("Invoices")?.name(), "invoices");
    Ok(())
}
