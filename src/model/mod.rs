// src/model/mod.rs
//! Content model: untyped CMS records and the views over them the
//! resolvers need.

mod translation;

pub use translation::{TranslationOverlay, TranslationRecord};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record fetched from a CMS collection.
///
/// Fields keep the order the CMS returned them in. Every transform takes
/// `&CmsItem` and returns a new item; there are no `&mut self` methods.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CmsItem(Map<String, Value>);

impl CmsItem {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wraps a JSON value when it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// The opaque identifier, string or number.
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id").filter(|id| !id.is_null())
    }

    /// The identifier rendered as a query value.
    pub fn id_string(&self) -> Option<String> {
        self.id().and_then(scalar_to_string)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns a copy of this item with `field` set to `value`.
    pub fn with_field(&self, field: impl Into<String>, value: Value) -> Self {
        let mut fields = self.0.clone();
        fields.insert(field.into(), value);
        Self(fields)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// The translation overlay carried by this item, if any.
    pub fn translations(&self) -> Option<TranslationOverlay<'_>> {
        self.0
            .get(crate::constants::TRANSLATIONS_FIELD)
            .and_then(TranslationOverlay::from_value)
    }
}

impl From<Map<String, Value>> for CmsItem {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// `item["field"]`, reading `Null` for absent fields like `Value` does.
impl std::ops::Index<&str> for CmsItem {
    type Output = Value;

    fn index(&self, field: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.0.get(field).unwrap_or(&NULL)
    }
}

impl From<CmsItem> for Value {
    fn from(item: CmsItem) -> Self {
        item.into_value()
    }
}

/// Renders a string or number JSON value as plain text.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn with_field_leaves_the_original_untouched() {
        let item = CmsItem::from_value(json!({ "id": 7, "title": "Alpina" })).unwrap();
        let updated = item.with_field("title", json!("Alpina Gstaad"));

        assert_eq!(item.str_field("title"), Some("Alpina"));
        assert_eq!(updated.str_field("title"), Some("Alpina Gstaad"));
        assert_eq!(updated.id_string().as_deref(), Some("7"));
    }

    #[test]
    fn non_objects_are_not_items() {
        assert!(CmsItem::from_value(json!([1, 2])).is_none());
        assert!(CmsItem::from_value(Value::Null).is_none());
    }
}
