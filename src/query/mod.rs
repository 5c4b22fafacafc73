// src/query/mod.rs
//! Query building, from structured intent to the CMS query-string grammar.
//!
//! Everything here is pure: the same [`QueryOptions`] always serializes to
//! the same parameters in the same order, which lets an external cache key
//! on the query string.
//!
//! Grammar:
//! - `filter[<field>][<operator>]=<value>`
//! - `fields=<comma separated list>`
//! - `deep[<relation>][<field>][<operator>]=<value>`
//! - `limit=<n>`, `offset=<n>`
//! - `sort=<comma separated list>` (leading `-` is descending)
//! - `search=<term>`, `meta=<comma separated list>`

mod filter;

pub use filter::{DeepFilterSpec, FilterSpec, FilterValue, EQUALS_OPERATOR};

use serde_json::Value;
use url::form_urlencoded;

/// A list parameter given either as one pre-joined string or as parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Passed through unchanged
    Raw(String),
    /// Joined with commas
    List(Vec<String>),
}

impl Selection {
    pub fn joined(&self) -> String {
        match self {
            Self::Raw(raw) => raw.clone(),
            Self::List(parts) => parts.join(","),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Raw(raw) => raw.is_empty(),
            Self::List(parts) => parts.is_empty(),
        }
    }
}

impl From<&str> for Selection {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl From<String> for Selection {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<Vec<String>> for Selection {
    fn from(parts: Vec<String>) -> Self {
        Self::List(parts)
    }
}

impl From<Vec<&str>> for Selection {
    fn from(parts: Vec<&str>) -> Self {
        Self::List(parts.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for Selection {
    fn from(parts: &[&str]) -> Self {
        Self::List(parts.iter().map(|p| p.to_string()).collect())
    }
}

/// Structured query intent for one collection request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryOptions {
    pub filter: FilterSpec,
    pub fields: Option<Selection>,
    pub deep: DeepFilterSpec,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub sort: Option<Selection>,
    pub search: Option<String>,
    pub meta: Option<Selection>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(self, filter: FilterSpec) -> Self {
        Self { filter, ..self }
    }

    pub fn with_fields(self, fields: impl Into<Selection>) -> Self {
        Self {
            fields: Some(fields.into()),
            ..self
        }
    }

    pub fn with_deep(self, deep: DeepFilterSpec) -> Self {
        Self { deep, ..self }
    }

    pub fn with_limit(self, limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }

    pub fn with_offset(self, offset: u32) -> Self {
        Self {
            offset: Some(offset),
            ..self
        }
    }

    /// Sets limit and offset for a 1-based page number.
    pub fn with_page(self, page: u32, per_page: u32) -> Self {
        Self {
            limit: Some(per_page),
            offset: Some(page.saturating_sub(1).saturating_mul(per_page)),
            ..self
        }
    }

    pub fn with_sort(self, sort: impl Into<Selection>) -> Self {
        Self {
            sort: Some(sort.into()),
            ..self
        }
    }

    pub fn with_search(self, term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..self
        }
    }

    pub fn with_meta(self, meta: impl Into<Selection>) -> Self {
        Self {
            meta: Some(meta.into()),
            ..self
        }
    }
}

/// Serializes query options into the CMS query-string grammar.
///
/// Parameters appear in the order filter, fields, deep, limit, offset,
/// sort, search, meta, and inside each group in declaration order.
/// Omitted options produce no parameter at all.
pub fn build(options: &QueryOptions) -> String {
    let mut params: Vec<(String, String)> = Vec::new();

    push_filter(&mut params, "filter", &options.filter);

    if let Some(fields) = options.fields.as_ref().filter(|f| !f.is_empty()) {
        params.push(("fields".to_string(), fields.joined()));
    }

    for (relation, filter) in options.deep.iter() {
        push_filter(&mut params, &format!("deep[{}]", relation), filter);
    }

    if let Some(limit) = options.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    if let Some(offset) = options.offset {
        params.push(("offset".to_string(), offset.to_string()));
    }
    if let Some(sort) = options.sort.as_ref().filter(|s| !s.is_empty()) {
        params.push(("sort".to_string(), sort.joined()));
    }
    if let Some(search) = options.search.as_ref().filter(|s| !s.is_empty()) {
        params.push(("search".to_string(), search.clone()));
    }
    if let Some(meta) = options.meta.as_ref().filter(|m| !m.is_empty()) {
        params.push(("meta".to_string(), meta.joined()));
    }

    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn push_filter(params: &mut Vec<(String, String)>, prefix: &str, filter: &FilterSpec) {
    for (field, condition) in filter.iter() {
        for (operator, value) in condition.comparisons() {
            params.push((
                format!(
                    "{}[{}][{}]",
                    prefix,
                    encode_component(field),
                    encode_component(operator)
                ),
                render_value(value),
            ));
        }
    }
}

/// Renders a filter value as it appears in the query string, before encoding.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(render_value).collect::<Vec<_>>().join(","),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Form-encodes a key or value, leaving the list separator readable.
fn encode_component(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace("%2C", ",")
}
