//! Arrest: a plug-and-play REST API over an introspected PostgreSQL schema.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod path;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use actions::{ActionContext, ActionFuture, ActionModule, ActionRegistry};
pub use catalog::{introspect, Column, SchemaCatalog, TableSchema};
pub use config::{load_config, Config};
pub use error::{AppError, ConfigError, SchemaError};
pub use path::PathSegments;
pub use response::Reply;
pub use routes::app;
pub use service::{QueryService, PredicateBuilder};
pub use sql::{QueryBuf, Row, SqlExecutor};
pub use state::AppState;
