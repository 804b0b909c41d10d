//! Ordering and pagination read from the query string.

use crate::service::sanitize::{leading_int, strip_tags};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// `order_by`, `order`, `limit` and `offset`.
///
/// `order_by` is only tag-stripped, not checked against the table's columns.
/// The statement builder quotes it, so an unknown name fails in the database.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub order_by: Option<String>,
    pub direction: SortDirection,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// A parameter counts only when present, non-empty and not `"0"`.
fn query_param(query: &HashMap<String, String>, key: &str) -> Option<String> {
    query
        .get(key)
        .filter(|v| !v.is_empty() && v.as_str() != "0")
        .map(|v| strip_tags(v))
}

fn positive(query: &HashMap<String, String>, key: &str) -> Option<u64> {
    query_param(query, key)
        .map(|v| leading_int(&v))
        .filter(|n| *n > 0)
        .map(|n| n as u64)
}

impl ListOptions {
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        ListOptions {
            order_by: query_param(query, "order_by").filter(|s| !s.is_empty()),
            direction: query_param(query, "order")
                .map(|s| SortDirection::parse(&s))
                .unwrap_or_default(),
            limit: positive(query, "limit"),
            offset: positive(query, "offset"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn reads_all_options() {
        let o = ListOptions::from_query(&query(&[
            ("order_by", "title"),
            ("order", "DESC"),
            ("limit", "10"),
            ("offset", "20x"),
        ]));
        assert_eq!(o.order_by.as_deref(), Some("title"));
        assert_eq!(o.direction, SortDirection::Desc);
        assert_eq!(o.limit, Some(10));
        assert_eq!(o.offset, Some(20));
    }

    #[test]
    fn falsy_and_junk_values_are_ignored() {
        let o = ListOptions::from_query(&query(&[
            ("order_by", "0"),
            ("order", "sideways"),
            ("limit", "abc"),
            ("offset", "-4"),
        ]));
        assert_eq!(o, ListOptions::default());
    }

    #[test]
    fn order_by_is_only_tag_stripped() {
        let o = ListOptions::from_query(&query(&[("order_by", "<b>title; drop</b>")]));
        assert_eq!(o.order_by.as_deref(), Some("title; drop"));
    }
}
