//! Named endpoints beyond generic CRUD: `OPTIONS /{module}/{action}/...`.
//!
//! Modules are registered at startup. A module maps action names to handlers;
//! a handler receives an [`ActionContext`] built for the request and returns JSON.
//! Handlers reach the database only through the context's SQL capability.

pub mod example;

use crate::catalog::SchemaCatalog;
use crate::config::Config;
use crate::error::AppError;
use crate::path::PathSegments;
use crate::service::{ListOptions, QueryService};
use crate::sql::SqlExecutor;
use crate::state::AppState;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Module used when the first segment is absent.
pub const DEFAULT_MODULE: &str = "main";
/// Action used when the second segment is absent.
pub const DEFAULT_ACTION: &str = "index";

pub type ActionFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, AppError>> + Send + 'a>>;
pub type ActionHandler = for<'a> fn(&'a ActionContext) -> ActionFuture<'a>;

/// Per-request instance handed to a handler.
pub struct ActionContext {
    pub config: Arc<Config>,
    /// Segments left after the module and action names.
    pub segments: PathSegments,
    pub executor: Arc<dyn SqlExecutor>,
    pub catalog: Arc<SchemaCatalog>,
    pub query: HashMap<String, String>,
}

impl ActionContext {
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.segment(index)
    }

    /// Ordering and pagination from the query string, as for generic reads.
    pub fn options(&self) -> ListOptions {
        ListOptions::from_query(&self.query)
    }

    pub fn queries(&self) -> QueryService<'_> {
        QueryService::new(self.executor.as_ref(), self.catalog.as_ref())
    }
}

#[derive(Default)]
pub struct ActionModule {
    handlers: HashMap<String, ActionHandler>,
}

impl ActionModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(mut self, name: &str, handler: ActionHandler) -> Self {
        self.handlers.insert(name.to_string(), handler);
        self
    }

    pub fn handler(&self, name: &str) -> Option<ActionHandler> {
        self.handlers.get(name).copied()
    }
}

#[derive(Default)]
pub struct ActionRegistry {
    modules: HashMap<String, ActionModule>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, name: &str, module: ActionModule) -> Self {
        self.modules.insert(name.to_string(), module);
        self
    }

    pub fn resolve(&self, module: &str, action: &str) -> Option<ActionHandler> {
        self.modules.get(module)?.handler(action)
    }
}

/// Consume module and action names from the front of `segments`, resolve the
/// handler and run it. Unknown module or action is NotFound.
pub async fn dispatch(
    state: &AppState,
    mut segments: PathSegments,
    query: HashMap<String, String>,
) -> Result<Value, AppError> {
    let module = segments.segment(0).unwrap_or(DEFAULT_MODULE).to_string();
    segments.shift();
    let action = segments.segment(0).unwrap_or(DEFAULT_ACTION).to_string();
    segments.shift();

    let handler = state
        .actions
        .resolve(&module, &action)
        .ok_or_else(|| AppError::not_found(format!("action {}/{}", module, action)))?;
    tracing::debug!(module = %module, action = %action, "dispatching action");

    let ctx = ActionContext {
        config: Arc::clone(&state.config),
        segments,
        executor: Arc::clone(&state.executor),
        catalog: Arc::clone(&state.catalog),
        query,
    };
    handler(&ctx).await
}
