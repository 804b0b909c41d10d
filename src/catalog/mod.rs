//! In-memory model of the live schema: tables, columns and the resolved primary key.
//! Built once at startup, then shared read-only.

mod introspect;
pub use introspect::*;

use crate::error::ConfigError;
use serde::ser::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Key column used when a table reports no primary key and has no override.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Column {
    pub name: String,
    /// PostgreSQL type as rendered by `format_type`, used to cast bound parameters.
    #[serde(rename = "type")]
    pub column_type: String,
    pub is_primary_key: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>, is_primary_key: bool) -> Self {
        Column {
            name: name.into(),
            column_type: column_type.into(),
            is_primary_key,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<Column>,
    /// Column addressed by id lookups, updates and deletes.
    pub primary_key: String,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        let primary_key = resolve_primary_key(&columns);
        TableSchema {
            name: name.into(),
            columns,
            primary_key,
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn primary_key_column(&self) -> Option<&Column> {
        self.column(&self.primary_key)
    }
}

/// Pick the key used for single-row addressing.
///
/// With a composite key the flagged column visited last wins. This is not
/// composite-key support: lookups address one column only.
pub fn resolve_primary_key(columns: &[Column]) -> String {
    columns
        .iter()
        .filter(|c| c.is_primary_key)
        .last()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| DEFAULT_PRIMARY_KEY.to_string())
}

#[derive(Clone, Debug, Default)]
pub struct SchemaCatalog {
    schema: String,
    tables: BTreeMap<String, TableSchema>,
}

impl SchemaCatalog {
    pub fn new(schema: impl Into<String>, tables: impl IntoIterator<Item = TableSchema>) -> Self {
        SchemaCatalog {
            schema: schema.into(),
            tables: tables.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    /// Database schema the tables live in.
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Force `column` as the primary key of `table`. Consumes the catalog so
    /// overrides can only happen before it is shared.
    pub fn with_primary_key(mut self, table: &str, column: &str) -> Result<Self, ConfigError> {
        let entry = self
            .tables
            .get_mut(table)
            .ok_or_else(|| ConfigError::UnknownTable(table.to_string()))?;
        if !entry.has_column(column) {
            return Err(ConfigError::InvalidPrimaryKey {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
        entry.primary_key = column.to_string();
        Ok(self)
    }

    pub fn with_overrides(self, overrides: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut pairs: Vec<_> = overrides.iter().collect();
        pairs.sort();
        pairs
            .into_iter()
            .try_fold(self, |catalog, (table, column)| catalog.with_primary_key(table, column))
    }
}

impl Serialize for SchemaCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn posts() -> TableSchema {
        TableSchema::new(
            "posts",
            vec![
                Column::new("id", "integer", true),
                Column::new("title", "text", false),
                Column::new("author", "text", false),
            ],
        )
    }

    #[test]
    fn single_flagged_column_is_the_key() {
        assert_eq!(posts().primary_key, "id");
    }

    #[test]
    fn composite_key_resolves_to_last_flagged_column() {
        let t = TableSchema::new(
            "post_tags",
            vec![
                Column::new("post_id", "integer", true),
                Column::new("note", "text", false),
                Column::new("tag_id", "integer", true),
            ],
        );
        assert_eq!(t.primary_key, "tag_id");
    }

    #[test]
    fn keyless_and_empty_tables_fall_back_to_id() {
        let t = TableSchema::new("log", vec![Column::new("line", "text", false)]);
        assert_eq!(t.primary_key, DEFAULT_PRIMARY_KEY);
        let empty = TableSchema::new("nothing", Vec::new());
        assert!(empty.columns.is_empty());
        assert_eq!(empty.primary_key, DEFAULT_PRIMARY_KEY);
    }

    #[test]
    fn override_replaces_key() {
        let catalog = SchemaCatalog::new("public", [posts()])
            .with_primary_key("posts", "title")
            .unwrap();
        assert_eq!(catalog.table("posts").unwrap().primary_key, "title");
    }

    #[test]
    fn override_rejects_unknown_names() {
        let catalog = SchemaCatalog::new("public", [posts()]);
        assert!(matches!(
            catalog.clone().with_primary_key("nope", "id"),
            Err(ConfigError::UnknownTable(_))
        ));
        assert!(matches!(
            catalog.with_primary_key("posts", "nope"),
            Err(ConfigError::InvalidPrimaryKey { .. })
        ));
    }

    #[test]
    fn serializes_as_table_map() {
        let catalog = SchemaCatalog::new("public", [posts()]);
        let v = serde_json::to_value(&catalog).unwrap();
        assert_eq!(v["posts"]["primary_key"], json!("id"));
        assert_eq!(
            v["posts"]["columns"][1],
            json!({"name": "title", "type": "text", "is_primary_key": false})
        );
    }
}
