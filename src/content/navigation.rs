// src/content/navigation.rs
//! Site navigation menus.
//!
//! A menu must never silently vanish, but it must not be faked either: on
//! failure the result is empty and carries a diagnostic, and the failure is
//! logged at error level.

use super::{CollectionSpec, ContentClient, Fetched, RequestContext};
use crate::model::{scalar_to_string, CmsItem};
use crate::query::{FilterSpec, QueryOptions};
use serde_json::Value;
use std::collections::HashMap;

/// Field nested entries are stored under by [`nest_navigation`].
pub const CHILDREN_FIELD: &str = "children";

/// Deepest submenu level kept; also stops parent cycles in editor data.
const MAX_MENU_DEPTH: usize = 8;

pub fn navigation_spec() -> CollectionSpec {
    CollectionSpec::new("navigation")
        .published_only()
        .fields(&["id", "menu", "label", "url", "parent", "sort", "page.slug", "translations.*"])
        .sorted_by("sort")
}

impl ContentClient {
    /// Entries of one menu (`main`, `footer`), flat, in sort order.
    pub async fn navigation(&self, menu: &str, ctx: &RequestContext) -> Fetched {
        let options = QueryOptions::new().with_filter(FilterSpec::new().eq("menu", menu));
        let fetched = self
            .fetch_collection(&navigation_spec(), options, ctx)
            .await;
        if let Some(diagnostic) = &fetched.diagnostic {
            log::error!("Navigation menu '{}' unavailable: {}", menu, diagnostic);
        }
        fetched
    }
}

/// Nests flat menu entries under their `parent` (an id or `{ id }`), keeping
/// sibling order. Entries whose parent is missing are promoted to the top.
pub fn nest_navigation(items: &[CmsItem]) -> Vec<CmsItem> {
    let ids: Vec<Option<String>> = items.iter().map(CmsItem::id_string).collect();
    let parent_of = |item: &CmsItem| -> Option<String> {
        let parent = match item.get("parent")? {
            Value::Object(parent) => parent.get("id")?,
            other => other,
        };
        scalar_to_string(parent).filter(|parent| ids.iter().flatten().any(|id| id == parent))
    };

    let mut children: HashMap<String, Vec<&CmsItem>> = HashMap::new();
    let mut roots = Vec::new();
    for item in items {
        match parent_of(item) {
            Some(parent) => children.entry(parent).or_default().push(item),
            None => roots.push(item),
        }
    }

    fn attach(item: &CmsItem, children: &HashMap<String, Vec<&CmsItem>>, depth: usize) -> CmsItem {
        let nested: Vec<Value> = match item.id_string().and_then(|id| children.get(&id)) {
            Some(kids) if depth < MAX_MENU_DEPTH => kids
                .iter()
                .map(|kid| attach(kid, children, depth + 1).into_value())
                .collect(),
            _ => Vec::new(),
        };
        item.with_field(CHILDREN_FIELD, Value::Array(nested))
    }

    roots
        .into_iter()
        .map(|root| attach(root, &children, 0))
        .collect()
}
