//! Scripted SQL capability and app builders shared by the HTTP tests.

#![allow(dead_code)]

use arrest::actions::example;
use arrest::config::ApiLogin;
use arrest::{app, ActionRegistry, AppState, Column, Config, QueryBuf, Row, SchemaCatalog, SqlExecutor, TableSchema};
use async_trait::async_trait;
use axum::Router;
use serde_json::Value;
use sqlx::error::{DatabaseError, ErrorKind};
use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Replays queued result sets in order and records every statement it sees.
/// An exhausted queue yields no rows.
#[derive(Default)]
pub struct ScriptedExecutor {
    results: Mutex<VecDeque<Vec<Row>>>,
    seen: Mutex<Vec<QueryBuf>>,
}

impl ScriptedExecutor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_rows(&self, rows: Vec<Value>) {
        let rows = rows
            .into_iter()
            .filter_map(|v| v.as_object().cloned())
            .collect();
        self.results.lock().unwrap().push_back(rows);
    }

    pub fn statements(&self) -> Vec<QueryBuf> {
        self.seen.lock().unwrap().clone()
    }

    pub fn sql(&self) -> Vec<String> {
        self.statements().into_iter().map(|q| q.sql).collect()
    }
}

#[async_trait]
impl SqlExecutor for ScriptedExecutor {
    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Row>, sqlx::Error> {
        self.seen.lock().unwrap().push(q.clone());
        Ok(self.results.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, sqlx::Error> {
        self.seen.lock().unwrap().push(q.clone());
        Ok(1)
    }
}

/// Executor whose every call fails, for the 500 path.
pub struct BrokenExecutor;

#[async_trait]
impl SqlExecutor for BrokenExecutor {
    async fn fetch_all(&self, _q: &QueryBuf) -> Result<Vec<Row>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn execute(&self, _q: &QueryBuf) -> Result<u64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

/// Database-side failure carrying a SQLSTATE code.
#[derive(Debug)]
pub struct SqlState(pub &'static str);

impl fmt::Display for SqlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sqlstate {}", self.0)
    }
}

impl std::error::Error for SqlState {}

impl DatabaseError for SqlState {
    fn message(&self) -> &str {
        "scripted database error"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.0))
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Fails every read with the given SQLSTATE.
pub struct FailingExecutor(pub &'static str);

#[async_trait]
impl SqlExecutor for FailingExecutor {
    async fn fetch_all(&self, _q: &QueryBuf) -> Result<Vec<Row>, sqlx::Error> {
        Err(sqlx::Error::Database(Box::new(SqlState(self.0))))
    }

    async fn execute(&self, _q: &QueryBuf) -> Result<u64, sqlx::Error> {
        Err(sqlx::Error::Database(Box::new(SqlState(self.0))))
    }
}

pub fn catalog() -> SchemaCatalog {
    SchemaCatalog::new(
        "public",
        [
            TableSchema::new(
                "posts",
                vec![
                    Column::new("id", "integer", true),
                    Column::new("title", "text", false),
                    Column::new("author", "text", false),
                ],
            ),
            TableSchema::new(
                "tags",
                vec![Column::new("slug", "text", false), Column::new("label", "text", false)],
            ),
        ],
    )
}

pub fn app_with(executor: Arc<dyn SqlExecutor>, config: Config) -> Router {
    app_with_catalog(executor, catalog(), config)
}

pub fn app_with_catalog(executor: Arc<dyn SqlExecutor>, catalog: SchemaCatalog, config: Config) -> Router {
    let actions = ActionRegistry::new().register(example::NAME, example::module());
    app(AppState::new(executor, catalog, config, actions))
}

pub fn test_app(executor: Arc<ScriptedExecutor>) -> Router {
    app_with(executor, Config::default())
}

pub fn gated_config() -> Config {
    Config {
        api_login: Some(ApiLogin {
            username: "admin".into(),
            password: "s3cret".into(),
        }),
        ..Config::default()
    }
}
