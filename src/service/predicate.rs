//! Single-column comparisons validated against the catalog.

use crate::catalog::SchemaCatalog;
use crate::error::AppError;
use crate::service::sanitize::{sanitize_identifier, sanitize_value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOperator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
}

impl FilterOperator {
    /// Map a path token (`eq`, `not`, `gt`, `lt`, any case). Unknown tokens never default.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "eq" => Some(FilterOperator::Equal),
            "not" => Some(FilterOperator::NotEqual),
            "gt" => Some(FilterOperator::GreaterThan),
            "lt" => Some(FilterOperator::LessThan),
            _ => None,
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            FilterOperator::Equal => "=",
            FilterOperator::NotEqual => "<>",
            FilterOperator::GreaterThan => ">",
            FilterOperator::LessThan => "<",
        }
    }
}

/// A validated `(column, operator, value)`; the value is always bound, never inlined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predicate {
    pub column: String,
    pub operator: FilterOperator,
    pub value: String,
}

pub struct PredicateBuilder;

impl PredicateBuilder {
    /// Validation order: sanitize column, check it exists, map the operator, clean the value.
    /// A missing operator is rejected; a missing value compares against the empty string.
    pub fn build(
        catalog: &SchemaCatalog,
        table: &str,
        raw_column: &str,
        raw_operator: Option<&str>,
        raw_value: Option<&str>,
    ) -> Result<Predicate, AppError> {
        let schema = catalog
            .table(table)
            .ok_or_else(|| AppError::not_found(format!("table {}", table)))?;
        let column = sanitize_identifier(raw_column);
        if !schema.has_column(&column) {
            return Err(AppError::not_found(format!("column {}.{}", table, column)));
        }
        let operator = raw_operator
            .and_then(FilterOperator::from_token)
            .ok_or_else(|| AppError::not_found(format!("operator {:?}", raw_operator)))?;
        Ok(Predicate {
            column,
            operator,
            value: sanitize_value(raw_value.unwrap_or("")),
        })
    }
}
