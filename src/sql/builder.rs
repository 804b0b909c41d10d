//! Builds parameterized SELECT, INSERT, UPDATE, DELETE against catalog tables.

use crate::catalog::{Column, TableSchema};
use crate::error::AppError;
use crate::service::{ListOptions, Payload, Predicate};
use serde_json::Value;

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        QueryBuf {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn with_params(sql: impl Into<String>, params: Vec<Value>) -> Self {
        QueryBuf {
            sql: sql.into(),
            params,
        }
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }

    /// Bind `v` and return its placeholder, cast to the column's type when known.
    fn bind_for(&mut self, column: Option<&Column>, v: Value) -> String {
        let n = self.push_param(v);
        match column.map(|c| c.column_type.as_str()).filter(|t| !t.is_empty()) {
            Some(t) => format!("${}::{}", n, t),
            None => format!("${}", n),
        }
    }
}

/// Integer keys compare against a `bigint` id; the id is never narrowed to the column type.
fn key_placeholder(q: &mut QueryBuf, key: Option<&Column>, id: i64) -> String {
    let n = q.push_param(Value::from(id));
    match key.map(|c| c.column_type.as_str()) {
        Some("smallint" | "integer" | "bigint") => format!("${}::bigint", n),
        Some(t) if !t.is_empty() => format!("${}::{}", n, t),
        _ => format!("${}", n),
    }
}

fn where_primary_key(q: &mut QueryBuf, table: &TableSchema, id: i64) -> String {
    let ph = key_placeholder(q, table.primary_key_column(), id);
    format!(" WHERE {} = {}", quoted(&table.primary_key), ph)
}

/// Payload keys must be columns of the table; they become quoted identifiers.
fn checked_column<'a>(table: &'a TableSchema, key: &str) -> Result<&'a Column, AppError> {
    table.column(key).ok_or_else(|| AppError::UnknownColumn {
        table: table.name.clone(),
        column: key.to_string(),
    })
}

/// SELECT * with an optional predicate, then ORDER BY / LIMIT / OFFSET from options.
pub fn select_list(
    schema: &str,
    table: &TableSchema,
    predicate: Option<&Predicate>,
    options: &ListOptions,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = match predicate {
        Some(p) => {
            let ph = q.bind_for(table.column(&p.column), Value::String(p.value.clone()));
            format!(" WHERE {} {} {}", quoted(&p.column), p.operator.sql(), ph)
        }
        None => String::new(),
    };
    let order_clause = options
        .order_by
        .as_deref()
        .map(|col| format!(" ORDER BY {} {}", quoted(col), options.direction.sql()))
        .unwrap_or_default();
    let limit_clause = options.limit.map(|n| format!(" LIMIT {}", n)).unwrap_or_default();
    let offset_clause = options.offset.map(|n| format!(" OFFSET {}", n)).unwrap_or_default();
    q.sql = format!(
        "SELECT * FROM {}{}{}{}{}",
        qualified_table(schema, &table.name),
        where_clause,
        order_clause,
        limit_clause,
        offset_clause
    );
    q
}

/// SELECT one row by the resolved primary key.
pub fn select_by_id(schema: &str, table: &TableSchema, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = where_primary_key(&mut q, table, id);
    q.sql = format!(
        "SELECT * FROM {}{} LIMIT 1",
        qualified_table(schema, &table.name),
        where_clause
    );
    q
}

pub fn insert(schema: &str, table: &TableSchema, payload: &Payload) -> Result<QueryBuf, AppError> {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(payload.len());
    let mut placeholders = Vec::with_capacity(payload.len());
    for (key, value) in payload.iter() {
        let column = checked_column(table, key)?;
        placeholders.push(q.bind_for(Some(column), Value::String(value.to_string())));
        cols.push(quoted(key));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        qualified_table(schema, &table.name),
        cols.join(", "),
        placeholders.join(", ")
    );
    Ok(q)
}

/// UPDATE by primary key, one SET entry per payload field.
pub fn update(schema: &str, table: &TableSchema, id: i64, payload: &Payload) -> Result<QueryBuf, AppError> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(payload.len());
    for (key, value) in payload.iter() {
        let column = checked_column(table, key)?;
        let ph = q.bind_for(Some(column), Value::String(value.to_string()));
        sets.push(format!("{} = {}", quoted(key), ph));
    }
    let where_clause = where_primary_key(&mut q, table, id);
    q.sql = format!(
        "UPDATE {} SET {}{}",
        qualified_table(schema, &table.name),
        sets.join(", "),
        where_clause
    );
    Ok(q)
}

pub fn delete(schema: &str, table: &TableSchema, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = where_primary_key(&mut q, table, id);
    q.sql = format!("DELETE FROM {}{}", qualified_table(schema, &table.name), where_clause);
    q
}
