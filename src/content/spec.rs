// src/content/spec.rs
//! Declarative description of one content collection.

use crate::constants::{ITEMS_ENDPOINT_PREFIX, PUBLISHED_STATUS};
use crate::query::{DeepFilterSpec, FilterSpec, QueryOptions, Selection};
use crate::resolve::ImageField;

/// What a fetcher knows about its collection before any caller input.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSpec {
    pub name: &'static str,
    pub base_filter: FilterSpec,
    pub fields: Vec<&'static str>,
    pub deep: DeepFilterSpec,
    pub image_fields: Vec<ImageField>,
    pub default_sort: Option<&'static str>,
    /// Expanded relations whose own translations are resolved too
    pub localized_relations: Vec<&'static str>,
}

impl CollectionSpec {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            base_filter: FilterSpec::new(),
            fields: Vec::new(),
            deep: DeepFilterSpec::new(),
            image_fields: Vec::new(),
            default_sort: None,
            localized_relations: Vec::new(),
        }
    }

    /// Only items with `status = published` unless the caller filters on
    /// `status` itself.
    pub fn published_only(self) -> Self {
        Self {
            base_filter: self.base_filter.eq("status", PUBLISHED_STATUS),
            ..self
        }
    }

    pub fn fields(self, fields: &[&'static str]) -> Self {
        Self {
            fields: fields.to_vec(),
            ..self
        }
    }

    pub fn deep(self, deep: DeepFilterSpec) -> Self {
        Self { deep, ..self }
    }

    pub fn images(self, image_fields: Vec<ImageField>) -> Self {
        Self {
            image_fields,
            ..self
        }
    }

    pub fn sorted_by(self, sort: &'static str) -> Self {
        Self {
            default_sort: Some(sort),
            ..self
        }
    }

    pub fn localize(self, relations: &[&'static str]) -> Self {
        Self {
            localized_relations: relations.to_vec(),
            ..self
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}", ITEMS_ENDPOINT_PREFIX, self.name)
    }

    /// Layers the caller's options over this collection's defaults.
    ///
    /// Caller filter fields replace base fields of the same name; caller
    /// fields, sort and deep relations replace the declared ones.
    pub fn query(&self, caller: QueryOptions) -> QueryOptions {
        let fields = caller.fields.or_else(|| {
            (!self.fields.is_empty()).then(|| Selection::from(self.fields.clone()))
        });
        let sort = caller
            .sort
            .or_else(|| self.default_sort.map(Selection::from));

        QueryOptions {
            filter: caller.filter.merged_over(&self.base_filter),
            deep: caller.deep.merged_over(&self.deep),
            fields,
            sort,
            ..caller
        }
    }
}
