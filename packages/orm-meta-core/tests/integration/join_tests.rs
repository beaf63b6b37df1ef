//! Joins built from relations and raw expressions.

use ntest::timeout;

use orm_meta_core::join::{CrossJoinInfo, JoinInfo, RelationJoin};
use orm_meta_core::query::RawExpr;
use orm_meta_core::table::JoinType;
use orm_meta_core::OrmError;

use super::helpers::create_registry;

#[timeout(1000)]
#[test]
fn test_select_with_relation_and_cross_joins() -> anyhow::Result<()> {
    let registry = create_registry()?;
    let orders = registry.get_table_instance("orders")?;

    let mut customer: JoinInfo =
        RelationJoin::from_relation(&registry, orders.structure(), "Customer")?.into();
    customer.set_foreign_columns_to_select(["name", "email"])?;

    let mut totals: JoinInfo = CrossJoinInfo::create(
        "Totals",
        RawExpr::new("LATERAL (SELECT SUM(total) AS sum FROM orders o2 WHERE o2.customer_id = orders.customer_id) t"),
    )?
    .into();
    totals.set_foreign_columns_to_select(["sum"])?;

    let select = orders
        .select()
        .columns(["id", "total"])?
        .join(customer)?
        .join(totals)?;

    assert_eq!(select.joins().len(), 2);
    match &select.joins()[0] {
        JoinInfo::Relation(join) => {
            assert_eq!(join.join_type(), JoinType::Inner);
            assert_eq!(join.foreign_table().table_name(), "customers");
        }
        JoinInfo::Cross(_) => panic!("Expected relation join first"),
    }
    assert_eq!(
        select.joins()[0].foreign_columns_to_select(),
        ["name".to_string(), "email".to_string()]
    );
    match &select.joins()[1] {
        JoinInfo::Cross(join) => {
            assert!(join.join_source_sql().starts_with("LATERAL ("));
            assert!(!join.join_source_sql().starts_with("(LATERAL"));
        }
        JoinInfo::Relation(_) => panic!("Expected cross join second"),
    }
    assert!(select.joins()[1].foreign_columns_to_select().is_empty());
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_invalid_relation_join_rejected_by_select() -> anyhow::Result<()> {
    let registry = create_registry()?;
    let orders = registry.get_table_structure("orders")?;
    let customers = registry.get_table_structure("customers")?;

    let broken = RelationJoin::new(
        "Broken",
        orders.clone(),
        "customer_id",
        JoinType::Left,
        customers,
        "customer_ref",
    )?;
    let result = registry
        .get_table_instance("orders")?
        .select()
        .join(broken.into());
    assert!(matches!(result, Err(OrmError::InvalidArgument(_))));
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_reverse_relation_join() -> anyhow::Result<()> {
    let registry = create_registry()?;
    let customers = registry.get_table_structure("customers")?;
    let join = RelationJoin::from_relation(&registry, &customers, "Orders")?;
    assert_eq!(join.join_type(), JoinType::Left);
    assert_eq!(join.local_column(), "id");
    assert_eq!(join.foreign_column(), "customer_id");
    assert!(join.is_valid());
    Ok(())
}
