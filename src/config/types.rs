//! Service configuration. Every field has a default so partial JSON files load.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Shared credential pair checked against the `username` / `password` cookies.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct ApiLogin {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for ApiLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiLogin")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    /// PostgreSQL schema whose tables are exposed.
    pub schema: String,
    /// Path prefix stripped before segment parsing, e.g. `/api`.
    pub base_uri: String,
    /// When set, requests must carry matching cookies.
    pub api_login: Option<ApiLogin>,
    /// Primary-key overrides: table name -> column name.
    pub table_index: HashMap<String, String>,
    pub bind: String,
    pub max_connections: u32,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "postgres://localhost/arrest".into(),
            schema: "public".into(),
            base_uri: String::new(),
            api_login: None,
            table_index: HashMap::new(),
            bind: "0.0.0.0:3000".into(),
            max_connections: 5,
            max_body_bytes: 1024 * 1024,
        }
    }
}
