// src/resolve/normalize.rs
//! Item normalization: locale overlay first, then asset URLs.

use super::asset::{AssetResolver, AssetTransform};
use super::locale::resolve_request;
use crate::model::CmsItem;
use crate::types::LocaleRequest;
use serde_json::{Map, Value};

/// An image-bearing field and the transform its URLs should carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageField {
    pub name: String,
    pub transform: Option<AssetTransform>,
}

impl ImageField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: None,
        }
    }

    pub fn with_transform(self, transform: AssetTransform) -> Self {
        Self {
            transform: Some(transform),
            ..self
        }
    }

    /// Name of the sibling field holding a singular image's URL.
    pub fn url_field(&self) -> String {
        format!("{}_url", self.name)
    }
}

impl From<&str> for ImageField {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Applies locale resolution and asset resolution to fetched items.
#[derive(Debug, Clone)]
pub struct ItemNormalizer {
    assets: AssetResolver,
}

impl ItemNormalizer {
    pub fn new(assets: AssetResolver) -> Self {
        Self { assets }
    }

    /// Normalizes one item. `None` stays `None`.
    ///
    /// For each image field:
    /// - an array (gallery) maps `{ image, .. }` entries to `{ .., image, url }`
    ///   and bare identifiers to `{ id, url }`;
    /// - anything else gets a sibling `<field>_url` and keeps its raw value.
    pub fn normalize(
        &self,
        item: Option<&CmsItem>,
        locale: &LocaleRequest,
        image_fields: &[ImageField],
    ) -> Option<CmsItem> {
        let localized = resolve_request(item?, locale);
        let mut fields = localized.fields().clone();

        for image_field in image_fields {
            match fields.get(&image_field.name) {
                Some(Value::Array(entries)) => {
                    let gallery = entries
                        .iter()
                        .map(|entry| self.gallery_entry(entry, image_field.transform.as_ref()))
                        .collect();
                    fields.insert(image_field.name.clone(), Value::Array(gallery));
                }
                Some(value) => {
                    let url = self
                        .assets
                        .resolve_value(value, image_field.transform.as_ref())
                        .map_or(Value::Null, Value::String);
                    fields.insert(image_field.url_field(), url);
                }
                None => {}
            }
        }

        Some(CmsItem::new(fields))
    }

    /// Normalizes a homogeneous collection, preserving order.
    pub fn normalize_many(
        &self,
        items: &[CmsItem],
        locale: &LocaleRequest,
        image_fields: &[ImageField],
    ) -> Vec<CmsItem> {
        items
            .iter()
            .filter_map(|item| self.normalize(Some(item), locale, image_fields))
            .collect()
    }

    /// Locale-resolves expanded relations (objects or arrays of objects)
    /// nested under `relations`, so `hotel.destination.title` reads in the
    /// same language as the hotel.
    pub fn localize_relations(
        &self,
        item: &CmsItem,
        locale: &LocaleRequest,
        relations: &[&str],
    ) -> CmsItem {
        let mut fields = item.fields().clone();
        for relation in relations {
            let localized = match fields.get(*relation) {
                Some(Value::Object(related)) => Some(localize_object(related, locale)),
                Some(Value::Array(related)) => Some(Value::Array(
                    related
                        .iter()
                        .map(|entry| match entry {
                            Value::Object(object) => localize_object(object, locale),
                            other => other.clone(),
                        })
                        .collect(),
                )),
                _ => None,
            };
            if let Some(localized) = localized {
                fields.insert(relation.to_string(), localized);
            }
        }
        CmsItem::new(fields)
    }

    fn gallery_entry(&self, entry: &Value, transform: Option<&AssetTransform>) -> Value {
        match entry {
            Value::Object(object) => match object.get("image") {
                Some(image) => {
                    let mut object = object.clone();
                    let url = self
                        .assets
                        .resolve_value(image, transform)
                        .map_or(Value::Null, Value::String);
                    object.insert("url".to_string(), url);
                    Value::Object(object)
                }
                None => entry.clone(),
            },
            id @ (Value::String(_) | Value::Number(_)) => {
                let mut object = Map::new();
                object.insert("id".to_string(), id.clone());
                object.insert(
                    "url".to_string(),
                    self.assets
                        .resolve_value(id, transform)
                        .map_or(Value::Null, Value::String),
                );
                Value::Object(object)
            }
            other => other.clone(),
        }
    }
}

fn localize_object(object: &Map<String, Value>, locale: &LocaleRequest) -> Value {
    resolve_request(&CmsItem::new(object.clone()), locale).into_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Locale;
    use serde_json::json;

    fn normalizer() -> ItemNormalizer {
        ItemNormalizer::new(AssetResolver::new("https://cms.example.com").unwrap())
    }

    fn english() -> LocaleRequest {
        LocaleRequest::new(Locale::new("en-US").unwrap())
    }

    #[test]
    fn gallery_entries_gain_urls_and_keep_image() {
        let item = CmsItem::from_value(json!({ "id": 1, "gallery": [{ "image": "x", "caption": "Lobby" }] })).unwrap();
        let normalized = normalizer()
            .normalize(Some(&item), &english(), &["gallery".into()])
            .unwrap();

        let entry = &normalized.get("gallery").unwrap()[0];
        assert!(entry["url"].as_str().unwrap().ends_with("/assets/x"));
        assert_eq!(entry["image"], json!("x"));
        assert_eq!(entry["caption"], json!("Lobby"));
    }

    #[test]
    fn bare_gallery_identifiers_are_wrapped() {
        let item = CmsItem::from_value(json!({ "id": 1, "gallery": ["a1", "/static/b.png", 17] })).unwrap();
        let normalized = normalizer()
            .normalize(Some(&item), &english(), &["gallery".into()])
            .unwrap();

        assert_eq!(
            normalized.get("gallery").unwrap(),
            &json!([
                { "id": "a1", "url": "https://cms.example.com/assets/a1" },
                { "id": "/static/b.png", "url": "/static/b.png" },
                { "id": 17, "url": "https://cms.example.com/assets/17" }
            ])
        );
    }

    #[test]
    fn singular_images_get_a_sibling_url() {
        let item = CmsItem::from_value(json!({
            "id": 1,
            "hero_image": { "id": "f1", "title": "Facade" },
            "logo": "f2",
            "cover": null
        }))
        .unwrap();
        let fields = [
            ImageField::from("hero_image").with_transform(AssetTransform::new().width(1200)),
            ImageField::from("logo"),
            ImageField::from("cover"),
            ImageField::from("missing"),
        ];
        let normalized = normalizer().normalize(Some(&item), &english(), &fields).unwrap();

        assert_eq!(
            normalized.str_field("hero_image_url"),
            Some("https://cms.example.com/assets/f1?width=1200&quality=80&format=webp&fit=cover")
        );
        assert_eq!(normalized.get("hero_image"), item.get("hero_image"));
        assert_eq!(normalized.str_field("logo_url"), Some("https://cms.example.com/assets/f2"));
        assert_eq!(normalized.get("cover_url"), Some(&Value::Null));
        assert!(!normalized.contains("missing_url"));
    }

    #[test]
    fn none_in_none_out() {
        assert_eq!(normalizer().normalize(None, &english(), &["hero".into()]), None);
    }

    #[test]
    fn relations_are_localized_too() {
        let item = CmsItem::from_value(json!({
            "id": 1,
            "destination": {
                "id": 9,
                "title": "Base",
                "translations": [{ "languages_code": "en-US", "title": "Crans-Montana" }]
            }
        }))
        .unwrap();
        let localized = normalizer().localize_relations(&item, &english(), &["destination"]);
        assert_eq!(localized.get("destination").unwrap()["title"], json!("Crans-Montana"));
    }
}
