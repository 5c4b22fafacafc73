// src/content/pages.rs
//! Free-form editorial pages (about, contact, legal).

use super::{CollectionSpec, ContentClient, Fetched, RequestContext};
use crate::model::CmsItem;
use crate::query::QueryOptions;
use crate::resolve::{AssetTransform, ImageField};

pub fn pages_spec() -> CollectionSpec {
    CollectionSpec::new("pages")
        .published_only()
        .fields(&["*", "translations.*"])
        .images(vec![
            ImageField::from("hero_image").with_transform(AssetTransform::new().width(1600)),
            ImageField::from("seo_image").with_transform(
                AssetTransform::new().width(1200).height(630).format("jpg"),
            ),
        ])
}

impl ContentClient {
    pub async fn pages(&self, options: QueryOptions, ctx: &RequestContext) -> Fetched {
        self.fetch_collection(&pages_spec(), options, ctx).await
    }

    pub async fn page_by_slug(&self, slug: &str, ctx: &RequestContext) -> Option<CmsItem> {
        self.by_slug(&pages_spec(), slug, ctx).await
    }
}
