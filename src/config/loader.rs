//! Load config from defaults, an optional JSON file and the environment.

use crate::config::{validate, ApiLogin, Config};
use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// Env var naming a JSON config file.
pub const CONFIG_PATH_VAR: &str = "ARREST_CONFIG";

/// Defaults, then `ARREST_CONFIG` file if set, then environment variables; validated.
pub fn load_config() -> Result<Config, ConfigError> {
    let mut config = match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => from_file(Path::new(&path))?,
        Err(_) => Config::default(),
    };
    apply_env(&mut config, |key| std::env::var(key).ok())?;
    validate(&mut config)?;
    Ok(config)
}

pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&text).map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::Load(format!("{}: {}", key, e)))
}

/// Parse `table:column,table2:column2`.
pub fn parse_table_index(raw: &str) -> Result<HashMap<String, String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            pair.split_once(':')
                .map(|(t, c)| (t.trim().to_string(), c.trim().to_string()))
                .ok_or_else(|| ConfigError::Load(format!("ARREST_TABLE_INDEX entry '{}' is not table:column", pair)))
        })
        .collect()
}

/// Overlay environment values. `lookup` is `std::env::var` in production.
pub fn apply_env<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("DATABASE_URL") {
        config.database_url = v;
    }
    if let Some(v) = lookup("ARREST_SCHEMA") {
        config.schema = v;
    }
    if let Some(v) = lookup("ARREST_BASE_URI") {
        config.base_uri = v;
    }
    match (lookup("ARREST_API_USERNAME"), lookup("ARREST_API_PASSWORD")) {
        (Some(username), Some(password)) => config.api_login = Some(ApiLogin { username, password }),
        (None, None) => {}
        _ => {
            return Err(ConfigError::Validation(
                "ARREST_API_USERNAME and ARREST_API_PASSWORD must be set together".into(),
            ))
        }
    }
    if let Some(v) = lookup("ARREST_TABLE_INDEX") {
        config.table_index.extend(parse_table_index(&v)?);
    }
    if let Some(v) = lookup("ARREST_BIND") {
        config.bind = v;
    }
    if let Some(v) = lookup("ARREST_MAX_CONNECTIONS") {
        config.max_connections = parse_var("ARREST_MAX_CONNECTIONS", &v)?;
    }
    if let Some(v) = lookup("ARREST_MAX_BODY_BYTES") {
        config.max_body_bytes = parse_var("ARREST_MAX_BODY_BYTES", &v)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    #[test]
    fn env_overrides_defaults() {
        let mut c = Config::default();
        apply_env(
            &mut c,
            env(&[
                ("DATABASE_URL", "postgres://db/blog"),
                ("ARREST_SCHEMA", "blog"),
                ("ARREST_API_USERNAME", "admin"),
                ("ARREST_API_PASSWORD", "secret"),
                ("ARREST_TABLE_INDEX", "posts:post_id, tags:slug"),
                ("ARREST_MAX_CONNECTIONS", "12"),
            ]),
        )
        .unwrap();
        assert_eq!(c.database_url, "postgres://db/blog");
        assert_eq!(c.schema, "blog");
        assert_eq!(c.api_login.as_ref().map(|l| l.username.as_str()), Some("admin"));
        assert_eq!(c.table_index.get("posts").map(String::as_str), Some("post_id"));
        assert_eq!(c.table_index.get("tags").map(String::as_str), Some("slug"));
        assert_eq!(c.max_connections, 12);
    }

    #[test]
    fn half_a_credential_pair_is_rejected() {
        let mut c = Config::default();
        let err = apply_env(&mut c, env(&[("ARREST_API_USERNAME", "admin")])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn bad_numbers_and_index_entries_fail() {
        let mut c = Config::default();
        assert!(apply_env(&mut c, env(&[("ARREST_MAX_BODY_BYTES", "lots")])).is_err());
        assert!(parse_table_index("posts").is_err());
        assert!(parse_table_index("").unwrap().is_empty());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let c: Config = serde_json::from_str(r#"{"schema": "blog", "api_login": {"username": "u", "password": "p"}}"#).unwrap();
        assert_eq!(c.schema, "blog");
        assert_eq!(c.bind, Config::default().bind);
        assert!(!format!("{:?}", c).contains("\"p\""));
    }
}
