//! Sample action module: `OPTIONS /example/describe` and `OPTIONS /example/test/{table}`.

use crate::actions::{ActionContext, ActionFuture, ActionModule};
use crate::error::AppError;
use serde_json::{json, Value};

pub const NAME: &str = "example";

pub fn module() -> ActionModule {
    ActionModule::new()
        .action("describe", describe)
        .action("test", test)
}

/// The whole catalog under `schema`.
fn describe(ctx: &ActionContext) -> ActionFuture<'_> {
    Box::pin(async move { Ok(json!({ "schema": &*ctx.catalog })) })
}

/// Rows of the table named by the next segment, with ordering and pagination.
fn test(ctx: &ActionContext) -> ActionFuture<'_> {
    Box::pin(async move {
        let queries = ctx.queries();
        let table = queries.table(ctx.segment(0))?;
        let rows = queries.list(table, None, &ctx.options()).await?;
        if rows.is_empty() {
            return Err(AppError::NoContent);
        }
        Ok(Value::Array(rows.into_iter().map(Value::Object).collect()))
    })
}
