//! Record sets over raw queries and structured selects.

use ntest::timeout;

use orm_meta_core::query::RawExpr;
use orm_meta_core::record_set::{RecordSet, RecordSetQuery, TableArg};
use orm_meta_core::OrmError;

use super::helpers::create_registry;

#[timeout(1000)]
#[test]
fn test_raw_string_table_argument() -> anyhow::Result<()> {
    let registry = create_registry()?;

    assert!(matches!(
        RecordSet::create(&registry, "SELECT 1", None),
        Err(OrmError::InvalidArgument(_))
    ));
    assert!(matches!(
        RecordSet::create(&registry, "SELECT 1", Some(TableArg::from(""))),
        Err(OrmError::InvalidArgument(_))
    ));

    let record_set = RecordSet::create(&registry, "SELECT 1", Some("orders".into()))?;
    assert_eq!(record_set.table().table_name(), "orders");
    assert_eq!(record_set.connection_name(true), "primary");
    assert!(matches!(record_set.query(), RecordSetQuery::Raw(sql) if sql == "SELECT 1"));
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_structure_table_argument() -> anyhow::Result<()> {
    let registry = create_registry()?;
    let customers = registry.get_table_structure("customers")?;
    let record_set = RecordSet::create(
        &registry,
        RawExpr::new("SELECT * FROM customers WHERE is_active"),
        Some(customers.clone().into()),
    )?;
    assert_eq!(record_set.table(), &customers);
    assert_eq!(
        record_set.raw_sql().as_deref(),
        Some("(SELECT * FROM customers WHERE is_active)")
    );
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_select_ignores_explicit_table() -> anyhow::Result<()> {
    let registry = create_registry()?;
    let orders = registry.get_table_instance("orders")?;
    let customers = registry.get_table_instance("customers")?;

    let implicit = RecordSet::create(&registry, orders.select().limit(10), None)?;
    let explicit = RecordSet::create(
        &registry,
        orders.select().limit(10),
        Some((&customers).into()),
    )?;

    assert_eq!(implicit.table().table_name(), "orders");
    assert_eq!(explicit.table().table_name(), "orders");
    match explicit.query() {
        RecordSetQuery::Select(select) => assert_eq!(select.get_limit(), Some(10)),
        _ => panic!("Expected select query"),
    }
    Ok(())
}
