// src/model/translation.rs
//! Read-only views over an item's `translations` field.

use serde_json::{Map, Value};

/// Fields on a translation record that describe the record itself rather
/// than translated content.
const LOCALE_METADATA_FIELDS: &[&str] = &["id", "locale", "languages_code", "languages_id"];

/// The two shapes a translation overlay arrives in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranslationOverlay<'a> {
    /// One record per locale
    Many(&'a [Value]),
    /// A single record already scoped to one locale
    Single(TranslationRecord<'a>),
}

impl<'a> TranslationOverlay<'a> {
    pub(crate) fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(records) => Some(Self::Many(records)),
            Value::Object(fields) => Some(Self::Single(TranslationRecord(fields))),
            _ => None,
        }
    }

    /// Records in the overlay that are objects; anything else is skipped.
    pub fn records(&self) -> Vec<TranslationRecord<'a>> {
        match self {
            Self::Many(records) => records
                .iter()
                .filter_map(Value::as_object)
                .map(TranslationRecord)
                .collect(),
            Self::Single(record) => vec![*record],
        }
    }
}

/// A single locale-scoped translation record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationRecord<'a>(&'a Map<String, Value>);

impl<'a> TranslationRecord<'a> {
    /// The locale tag, read from `languages_code` (string or `{ code }`)
    /// or from `locale`.
    pub fn locale_tag(&self) -> Option<&'a str> {
        let fields = self.0;
        let tag = ["languages_code", "locale"]
            .into_iter()
            .filter_map(|key| fields.get(key))
            .find(|tag| !tag.is_null())?;
        match tag {
            Value::String(code) => Some(code.as_str()),
            Value::Object(language) => language.get("code").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Translated fields worth overlaying: metadata, owner references to
    /// `owner_id` and null values are excluded.
    pub fn content_fields(
        &self,
        owner_id: Option<&'a Value>,
    ) -> impl Iterator<Item = (&'a String, &'a Value)> + 'a {
        self.0.iter().filter(move |(key, value)| {
            !value.is_null()
                && !LOCALE_METADATA_FIELDS.contains(&key.as_str())
                && !is_owner_reference(key, value, owner_id)
        })
    }
}

/// `<collection>_id` fields pointing back at the owning item.
fn is_owner_reference(key: &str, value: &Value, owner_id: Option<&Value>) -> bool {
    if !key.ends_with("_id") {
        return false;
    }
    let Some(owner_id) = owner_id else {
        return false;
    };
    match value {
        Value::Object(reference) => reference.get("id") == Some(owner_id),
        other => other == owner_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_tag_from_either_shape() {
        let plain = json!({ "languages_code": "de-DE" });
        let nested = json!({ "languages_code": { "code": "fr-FR", "name": "French" } });
        let legacy = json!({ "locale": "it-IT" });

        for (value, expected) in [(&plain, "de-DE"), (&nested, "fr-FR"), (&legacy, "it-IT")] {
            let record = TranslationRecord(value.as_object().unwrap());
            assert_eq!(record.locale_tag(), Some(expected));
        }
    }

    #[test]
    fn null_language_code_falls_through_to_locale() {
        let value = json!({ "languages_code": null, "locale": "de-CH", "title": "Seehotel" });
        let record = TranslationRecord(value.as_object().unwrap());
        assert_eq!(record.locale_tag(), Some("de-CH"));
    }

    #[test]
    fn content_fields_drop_metadata_and_owner() {
        let value = json!({
            "id": 91,
            "hotels_id": 12,
            "booking_engine_id": "be-44",
            "languages_code": "de-DE",
            "title": "Berghotel",
            "description": null
        });
        let owner = json!(12);
        let record = TranslationRecord(value.as_object().unwrap());
        let keys: Vec<&str> = record
            .content_fields(Some(&owner))
            .map(|(k, _)| k.as_str())
            .collect();

        assert_eq!(keys, vec!["booking_engine_id", "title"]);
    }
}
