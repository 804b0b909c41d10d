//! Config validation and normalization.

use crate::config::Config;
use crate::error::ConfigError;
use regex::Regex;

const IDENTIFIER_PATTERN: &str = r"^[A-Za-z0-9_]+$";

pub fn validate(config: &mut Config) -> Result<(), ConfigError> {
    let ident = Regex::new(IDENTIFIER_PATTERN).map_err(|e| ConfigError::Validation(e.to_string()))?;

    if config.schema.trim().is_empty() {
        return Err(ConfigError::Validation("schema must not be empty".into()));
    }
    for (table, column) in &config.table_index {
        if !ident.is_match(table) || !ident.is_match(column) {
            return Err(ConfigError::Validation(format!(
                "table_index entry {}:{} is not a plain identifier",
                table, column
            )));
        }
    }
    if let Some(login) = &config.api_login {
        if login.username.is_empty() || login.password.is_empty() {
            return Err(ConfigError::Validation("api_login needs a username and a password".into()));
        }
    }
    if config.max_connections == 0 {
        return Err(ConfigError::Validation("max_connections must be at least 1".into()));
    }
    config.base_uri = normalize_base_uri(&config.base_uri);
    Ok(())
}

/// Leading slash, no trailing slash; empty stays empty.
pub fn normalize_base_uri(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
