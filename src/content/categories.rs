// src/content/categories.rs

use super::{CollectionSpec, ContentClient, Fetched, RequestContext};
use crate::model::CmsItem;
use crate::query::QueryOptions;
use crate::resolve::ImageField;

/// Categories carry no publishing workflow, so there is no status filter.
pub fn categories_spec() -> CollectionSpec {
    CollectionSpec::new("categories")
        .fields(&["id", "slug", "icon", "sort", "translations.*"])
        .images(vec![ImageField::from("icon")])
        .sorted_by("sort")
}

impl ContentClient {
    pub async fn categories(&self, options: QueryOptions, ctx: &RequestContext) -> Fetched {
        self.fetch_collection(&categories_spec(), options, ctx)
            .await
    }

    pub async fn category_by_slug(&self, slug: &str, ctx: &RequestContext) -> Option<CmsItem> {
        self.by_slug(&categories_spec(), slug, ctx).await
    }
}
