//! The SQL capability: executes parameterized statements and returns JSON rows.

use crate::sql::{bind_params, QueryBuf};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{PgPool, Row as _};

/// One result row keyed by column name.
pub type Row = Map<String, Value>;

/// Everything the engine and action modules need from the database.
/// Implementations borrow a connection per call and release it on every exit path.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Row>, sqlx::Error>;

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Row>, sqlx::Error> {
        Ok(self.fetch_all(q).await?.into_iter().next())
    }

    /// Run a statement without a result set. Returns affected rows.
    async fn execute(&self, q: &QueryBuf) -> Result<u64, sqlx::Error>;

    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.fetch_all(&QueryBuf::raw("SELECT 1")).await.map(|_| ())
    }
}

/// SQLSTATE class 22: a bound value the column type cannot represent.
pub fn is_data_exception(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.code())
        .map_or(false, |code| code.starts_with("22"))
}

/// Wrap a SELECT so PostgreSQL serializes each row itself; covers every column type.
fn json_rows_sql(sql: &str) -> String {
    format!("SELECT row_to_json(q) AS row FROM ({}) q", sql)
}

fn into_row(v: Value) -> Row {
    match v {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

#[async_trait]
impl SqlExecutor for PgPool {
    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Row>, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let sql = json_rows_sql(&q.sql);
        let rows = bind_params(sqlx::query(&sql), &q.params).fetch_all(self).await?;
        rows.iter()
            .map(|r| r.try_get::<Value, _>("row").map(into_row))
            .collect()
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Row>, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let sql = json_rows_sql(&q.sql);
        let row = bind_params(sqlx::query(&sql), &q.params)
            .fetch_optional(self)
            .await?;
        row.map(|r| r.try_get::<Value, _>("row").map(into_row))
            .transpose()
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let done = bind_params(sqlx::query(&q.sql), &q.params).execute(self).await?;
        Ok(done.rows_affected())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(self).await.map(|_| ())
    }
}
