//! Generic CRUD execution against the catalog through the SQL capability.

use crate::catalog::{SchemaCatalog, TableSchema};
use crate::error::AppError;
use crate::path::PathSegments;
use crate::response::Reply;
use crate::service::sanitize::numeric_id;
use crate::service::{ListOptions, Payload, Predicate, PredicateBuilder};
use crate::sql::{delete, insert, is_data_exception, select_by_id, select_list, update, Row, SqlExecutor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

/// What the segment after the table name addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// No id (missing, empty, `0`, or numeric zero).
    All,
    /// Numeric segment: always a primary-key lookup, never a filter column.
    Id(i64),
    /// Non-numeric segment: a column name, followed by operator and value segments.
    Filter {
        column: String,
        operator: Option<String>,
        value: Option<String>,
    },
}

impl Target {
    pub fn classify(segments: &PathSegments) -> Self {
        let Some(seg) = segments.segment(1) else {
            return Target::All;
        };
        match numeric_id(seg) {
            Some(0) => Target::All,
            Some(id) => Target::Id(id),
            None => Target::Filter {
                column: seg.to_string(),
                operator: segments.get(2).map(str::to_string),
                value: segments.get(3).map(str::to_string),
            },
        }
    }
}

/// One generic CRUD request, built per call and discarded afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryRequest {
    pub table: Option<String>,
    pub operation: Operation,
    pub target: Target,
    pub options: ListOptions,
    pub payload: Payload,
}

impl QueryRequest {
    pub fn from_segments(
        operation: Operation,
        segments: &PathSegments,
        options: ListOptions,
        payload: Payload,
    ) -> Self {
        QueryRequest {
            table: segments.segment(0).map(str::to_string),
            operation,
            target: Target::classify(segments),
            options,
            payload,
        }
    }
}

pub struct QueryService<'a> {
    executor: &'a dyn SqlExecutor,
    catalog: &'a SchemaCatalog,
}

impl<'a> QueryService<'a> {
    pub fn new(executor: &'a dyn SqlExecutor, catalog: &'a SchemaCatalog) -> Self {
        QueryService { executor, catalog }
    }

    pub async fn run(&self, request: &QueryRequest) -> Result<Reply, AppError> {
        let table = request.table.as_deref();
        match request.operation {
            Operation::Create => self.create(table, &request.payload).await,
            Operation::Read => self.read(table, &request.target, &request.options).await,
            Operation::Update => self.update(table, &request.target, &request.payload).await,
            Operation::Delete => self.delete(table, &request.target).await,
        }
    }

    /// Known table or NotFound.
    pub fn table(&self, name: Option<&str>) -> Result<&'a TableSchema, AppError> {
        let name = name.ok_or_else(|| AppError::not_found("missing table segment"))?;
        self.catalog
            .table(name)
            .ok_or_else(|| AppError::not_found(format!("table {}", name)))
    }

    /// Insert one row. Unknown table is checked before the payload.
    pub async fn create(&self, table: Option<&str>, payload: &Payload) -> Result<Reply, AppError> {
        let table = self.table(table)?;
        if payload.is_empty() {
            return Err(AppError::NoContent);
        }
        let q = insert(self.catalog.schema_name(), table, payload)?;
        self.executor.execute(&q).await?;
        Ok(Reply::Success)
    }

    pub async fn read(&self, table: Option<&str>, target: &Target, options: &ListOptions) -> Result<Reply, AppError> {
        let table = self.table(table)?;
        match target {
            Target::All => non_empty(self.list(table, None, options).await?),
            Target::Id(id) => self
                .find(table, *id)
                .await?
                .map(Reply::Row)
                .ok_or(AppError::NoContent),
            Target::Filter { column, operator, value } => {
                let predicate = PredicateBuilder::build(
                    self.catalog,
                    &table.name,
                    column,
                    operator.as_deref(),
                    value.as_deref(),
                )?;
                match self.list(table, Some(&predicate), options).await {
                    Err(AppError::Db(e)) if is_data_exception(&e) => {
                        tracing::debug!(error = %e, column = %predicate.column, "filter value does not fit column");
                        Err(AppError::NoContent)
                    }
                    rows => non_empty(rows?),
                }
            }
        }
    }

    /// Rows of `table`, optionally filtered, honoring ordering and pagination.
    pub async fn list(
        &self,
        table: &TableSchema,
        predicate: Option<&Predicate>,
        options: &ListOptions,
    ) -> Result<Vec<Row>, AppError> {
        let q = select_list(self.catalog.schema_name(), table, predicate, options);
        Ok(self.executor.fetch_all(&q).await?)
    }

    /// Row whose resolved primary key equals `id`.
    pub async fn find(&self, table: &TableSchema, id: i64) -> Result<Option<Row>, AppError> {
        let q = select_by_id(self.catalog.schema_name(), table, id);
        Ok(self.executor.fetch_optional(&q).await?)
    }

    /// Existence check, then UPDATE. A missing row never reaches the UPDATE.
    pub async fn update(&self, table: Option<&str>, target: &Target, payload: &Payload) -> Result<Reply, AppError> {
        let (table, id) = self.addressed_row(table, target)?;
        if self.find(table, id).await?.is_none() {
            return Err(AppError::NoContent);
        }
        if payload.is_empty() {
            return Err(AppError::NoContent);
        }
        let q = update(self.catalog.schema_name(), table, id, payload)?;
        self.executor.execute(&q).await?;
        Ok(Reply::Success)
    }

    /// Existence check, then DELETE.
    pub async fn delete(&self, table: Option<&str>, target: &Target) -> Result<Reply, AppError> {
        let (table, id) = self.addressed_row(table, target)?;
        if self.find(table, id).await?.is_none() {
            return Err(AppError::NoContent);
        }
        let q = delete(self.catalog.schema_name(), table, id);
        self.executor.execute(&q).await?;
        Ok(Reply::Success)
    }

    /// Update and delete need a known table and a non-zero numeric id.
    fn addressed_row(&self, table: Option<&str>, target: &Target) -> Result<(&'a TableSchema, i64), AppError> {
        let table = self.table(table)?;
        match target {
            Target::Id(id) => Ok((table, *id)),
            _ => Err(AppError::not_found(format!("row id for {}", table.name))),
        }
    }
}

fn non_empty(rows: Vec<Row>) -> Result<Reply, AppError> {
    if rows.is_empty() {
        Err(AppError::NoContent)
    } else {
        Ok(Reply::Rows(rows))
    }
}
