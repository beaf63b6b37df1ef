//! Table metadata and registry resolution through the public API.

use std::sync::Arc;

use ntest::timeout;
use serde_json::json;

use orm_meta_core::table::TableDefinition;
use orm_meta_core::OrmError;

use super::helpers::{create_registry, installed_registry, Customers, Orders};

#[timeout(1000)]
#[test]
fn test_registered_names_resolve_to_matching_structures() -> anyhow::Result<()> {
    let registry = create_registry()?;
    for name in registry.table_names() {
        assert_eq!(registry.get_table_structure(name)?.table_name(), name);
    }
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_column_and_relation_lookups_are_total() -> anyhow::Result<()> {
    let registry = create_registry()?;
    for name in registry.table_names() {
        let structure = registry.get_table_structure(name)?;
        for column in structure.column_names() {
            assert_eq!(structure.get_column(column)?.name(), column);
        }
        for relation in structure.relations() {
            assert_eq!(structure.get_relation(&relation.name)?, relation);
        }

        for _ in 0..2 {
            assert!(matches!(
                structure.get_column("no_such_column"),
                Err(OrmError::UnknownColumn { .. })
            ));
            assert!(matches!(
                structure.get_relation("NoSuchRelation"),
                Err(OrmError::UnknownRelation { .. })
            ));
        }
    }
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_definition_singleton_identity() -> anyhow::Result<()> {
    let registry = installed_registry();

    let first = Orders::instance()?;
    let second = Orders::instance()?;
    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first, &registry.get_table_structure("orders")?));
    assert!(Arc::ptr_eq(&first, &registry.structure_of::<Orders>()?));

    assert_eq!(first.connection_name(false), "replica");
    assert_eq!(first.connection_name(true), "primary");
    assert!(Arc::ptr_eq(
        &Customers::instance()?,
        &registry.get_table_structure("customers")?
    ));
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_structure_metadata() -> anyhow::Result<()> {
    let registry = create_registry()?;
    let orders = registry.get_table_structure("orders")?;

    assert_eq!(orders.connection_name(false), "default");
    assert_eq!(orders.connection_name(true), "primary");
    assert_eq!(orders.schema(), Some("sales"));
    assert!(orders.has_pk_column());
    assert_eq!(orders.pk_column_name(), Some("id"));

    let files: Vec<&str> = orders.file_columns().iter().map(|c| c.name()).collect();
    assert_eq!(files, vec!["invoice"]);

    let customer = orders.get_relation("Customer")?;
    assert_eq!(customer.display_column.as_deref(), Some("name"));

    let customers = registry.get_table_structure("customers")?;
    assert!(customers.has_file_column("avatar"));
    assert_eq!(customers.connection_name(true), "default");
    assert_eq!(customers.schema(), None);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_aliases() -> anyhow::Result<()> {
    let registry = create_registry()?;
    assert_eq!(registry.get_table_instance_by_alias("Customers")?.name(), "customers");
    assert_eq!(registry.get_table_instance_by_alias("Purchases")?.name(), "orders");
    assert!(matches!(
        registry.get_table_instance_by_alias("Orders"),
        Err(OrmError::UnknownTable { .. })
    ));
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_records_from_registry() -> anyhow::Result<()> {
    let registry = create_registry()?;

    let mut customer = registry.new_record_instance(Customers::TABLE_NAME)?;
    assert_eq!(customer.get("is_active")?, Some(&json!(true)));
    customer.set("is_active", json!("0"))?;
    assert_eq!(customer.get("is_active")?, Some(&json!(false)));

    let mut order = registry.get_table_instance("orders")?.new_record();
    order.set("total", json!(12.5))?;
    assert!(matches!(
        order.set("customer_id", json!(null)),
        Err(OrmError::InvalidValue { .. })
    ));
    assert!(!order.has_value("customer_id"));
    Ok(())
}
