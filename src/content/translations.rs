// src/content/translations.rs
//! Interface strings (button labels, headings) kept in the CMS so editors
//! can translate them alongside content.

use super::{CollectionSpec, ContentClient, RequestContext};
use crate::error::FetchDiagnostic;
use crate::query::{FilterSpec, QueryOptions};
use indexmap::IndexMap;
use serde::Serialize;

/// Upper bound on strings fetched per namespace.
const UI_STRINGS_LIMIT: u32 = 1_000;

pub fn ui_strings_spec() -> CollectionSpec {
    CollectionSpec::new("translations")
        .fields(&["id", "key", "namespace", "value", "translations.*"])
        .sorted_by("key")
}

/// Key → localized string, in key order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UiStrings {
    pub entries: IndexMap<String, String>,
    #[serde(skip)]
    pub diagnostic: Option<FetchDiagnostic>,
}

impl UiStrings {
    /// The string for `key`, or the key itself so a missing translation is
    /// visible but never breaks a page.
    pub fn get_or_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }
}

impl ContentClient {
    /// Interface strings for the request locale, with the fallback locale
    /// filling gaps. `namespace` narrows to one group such as `booking`.
    pub async fn ui_strings(&self, namespace: Option<&str>, ctx: &RequestContext) -> UiStrings {
        let filter = match namespace {
            Some(namespace) => FilterSpec::new().eq("namespace", namespace),
            None => FilterSpec::new(),
        };
        let options = QueryOptions::new()
            .with_filter(filter)
            .with_limit(UI_STRINGS_LIMIT);
        let fetched = self
            .fetch_collection(&ui_strings_spec(), options, ctx)
            .await;

        let entries = fetched
            .data
            .iter()
            .filter_map(|item| {
                let key = item.str_field("key")?;
                let value = item.str_field("value")?;
                Some((key.to_string(), value.to_string()))
            })
            .collect();

        UiStrings {
            entries,
            diagnostic: fetched.diagnostic,
        }
    }
}
