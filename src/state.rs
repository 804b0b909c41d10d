//! Shared application state. Everything here is read-only once serving starts.

use crate::actions::ActionRegistry;
use crate::catalog::SchemaCatalog;
use crate::config::Config;
use crate::sql::SqlExecutor;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<dyn SqlExecutor>,
    pub catalog: Arc<SchemaCatalog>,
    pub config: Arc<Config>,
    pub actions: Arc<ActionRegistry>,
}

impl AppState {
    pub fn new(
        executor: Arc<dyn SqlExecutor>,
        catalog: SchemaCatalog,
        config: Config,
        actions: ActionRegistry,
    ) -> Self {
        AppState {
            executor,
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            actions: Arc::new(actions),
        }
    }
}
