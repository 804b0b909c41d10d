//! Build the catalog from the live database.

use crate::catalog::{Column, SchemaCatalog, TableSchema};
use crate::error::SchemaError;
use crate::sql::{QueryBuf, Row, SqlExecutor};
use serde_json::Value;

pub const TABLES_SQL: &str = "SELECT table_name::text AS table_name \
     FROM information_schema.tables \
     WHERE table_schema = $1 AND table_type IN ('BASE TABLE', 'VIEW') \
     ORDER BY table_name";

/// Columns in ordinal order; `column_key` is `PRI` for members of the primary-key index.
pub const COLUMNS_SQL: &str = "SELECT a.attname::text AS column_name, \
     format_type(a.atttypid, a.atttypmod) AS column_type, \
     CASE WHEN EXISTS ( \
         SELECT 1 FROM pg_index i \
         WHERE i.indrelid = a.attrelid AND i.indisprimary AND a.attnum = ANY(i.indkey) \
     ) THEN 'PRI' ELSE '' END AS column_key \
     FROM pg_attribute a \
     JOIN pg_class c ON c.oid = a.attrelid \
     JOIN pg_namespace n ON n.oid = c.relnamespace \
     WHERE n.nspname = $1 AND c.relname = $2 AND a.attnum > 0 AND NOT a.attisdropped \
     ORDER BY a.attnum";

fn text_field(row: &Row, field: &'static str, context: &str) -> Result<String, SchemaError> {
    row.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SchemaError::MissingField {
            context: context.to_string(),
            field,
        })
}

/// Turn one `COLUMNS_SQL` row into a column.
pub fn column_from_row(table: &str, row: &Row) -> Result<Column, SchemaError> {
    let name = text_field(row, "column_name", table)?;
    let column_type = text_field(row, "column_type", table)?;
    let key = row.get("column_key").and_then(Value::as_str).unwrap_or("");
    Ok(Column {
        name,
        column_type,
        is_primary_key: key.eq_ignore_ascii_case("PRI"),
    })
}

/// Enumerate every table of `schema` and its columns. Any failure aborts the
/// whole build; no partially populated catalog is ever returned.
pub async fn introspect(executor: &dyn SqlExecutor, schema: &str) -> Result<SchemaCatalog, SchemaError> {
    let table_rows = executor
        .fetch_all(&QueryBuf::with_params(TABLES_SQL, vec![Value::String(schema.to_string())]))
        .await?;
    let mut tables = Vec::with_capacity(table_rows.len());
    for row in &table_rows {
        let name = text_field(row, "table_name", schema)?;
        let column_rows = executor
            .fetch_all(&QueryBuf::with_params(
                COLUMNS_SQL,
                vec![Value::String(schema.to_string()), Value::String(name.clone())],
            ))
            .await?;
        let columns = column_rows
            .iter()
            .map(|r| column_from_row(&name, r))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(table = %name, columns = columns.len(), "introspected table");
        tables.push(TableSchema::new(name, columns));
    }
    tracing::info!(schema = %schema, tables = tables.len(), "schema catalog built");
    Ok(SchemaCatalog::new(schema, tables))
}
