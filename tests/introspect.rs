//! Catalog construction from scripted introspection results.

mod common;

use arrest::catalog::{COLUMNS_SQL, TABLES_SQL};
use arrest::introspect;
use common::ScriptedExecutor;
use serde_json::json;

#[tokio::test]
async fn builds_catalog_from_tables_and_columns() {
    let db = ScriptedExecutor::new();
    db.push_rows(vec![json!({"table_name": "orders"}), json!({"table_name": "tags"})]);
    db.push_rows(vec![
        json!({"column_name": "tenant", "column_type": "integer", "column_key": "PRI"}),
        json!({"column_name": "order_no", "column_type": "bigint", "column_key": "PRI"}),
        json!({"column_name": "total", "column_type": "numeric(10,2)", "column_key": ""}),
    ]);
    db.push_rows(vec![json!({"column_name": "slug", "column_type": "text", "column_key": ""})]);

    let catalog = introspect(db.as_ref(), "shop").await.unwrap();
    assert_eq!(catalog.schema_name(), "shop");
    assert_eq!(catalog.len(), 2);
    // Composite keys resolve to the last flagged column.
    assert_eq!(catalog.table("orders").unwrap().primary_key, "order_no");
    assert_eq!(catalog.table("tags").unwrap().primary_key, "id");

    let seen = db.statements();
    assert_eq!(seen[0].sql, TABLES_SQL);
    assert_eq!(seen[0].params, vec![json!("shop")]);
    assert_eq!(seen[1].sql, COLUMNS_SQL);
    assert_eq!(seen[1].params, vec![json!("shop"), json!("orders")]);
}

#[tokio::test]
async fn malformed_row_aborts_the_build() {
    let db = ScriptedExecutor::new();
    db.push_rows(vec![json!({"table_name": "orders"})]);
    db.push_rows(vec![json!({"column_type": "integer"})]);
    assert!(introspect(db.as_ref(), "shop").await.is_err());
}
