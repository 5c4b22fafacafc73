// src/content/destinations.rs

use super::{CollectionSpec, ContentClient, Fetched, RequestContext};
use crate::model::CmsItem;
use crate::query::{FilterSpec, QueryOptions};
use crate::resolve::{AssetTransform, ImageField};
use serde_json::Value;

/// Field the destination detail view stores its hotels under.
pub const HOTELS_FIELD: &str = "hotels";

pub fn destinations_spec() -> CollectionSpec {
    CollectionSpec::new("destinations")
        .published_only()
        .fields(&["*", "translations.*"])
        .images(vec![
            ImageField::from("hero_image").with_transform(AssetTransform::new().width(1600)),
            ImageField::from("gallery"),
        ])
        .sorted_by("sort")
}

impl ContentClient {
    pub async fn destinations(&self, options: QueryOptions, ctx: &RequestContext) -> Fetched {
        self.fetch_collection(&destinations_spec(), options, ctx)
            .await
    }

    /// Destination detail with its hotels under `hotels`. Both requests
    /// only need the slug, so they run concurrently. A failed hotel listing
    /// leaves `hotels` empty and is logged with its diagnostic.
    pub async fn destination_by_slug(&self, slug: &str, ctx: &RequestContext) -> Option<CmsItem> {
        let spec = destinations_spec();
        let (destination, hotels) = futures::join!(
            self.by_slug(&spec, slug, ctx),
            self.hotels_in_destination(slug, QueryOptions::new(), ctx)
        );
        let Some(destination) = destination else {
            log::debug!("Destination {} not found; dropping its hotel listing", slug);
            return None;
        };
        if let Some(diagnostic) = &hotels.diagnostic {
            log::warn!("Destination {} served without hotels: {}", slug, diagnostic);
        }
        let hotels = Value::Array(hotels.data.into_iter().map(CmsItem::into_value).collect());
        Some(destination.with_field(HOTELS_FIELD, hotels))
    }

    pub async fn featured_destinations(&self, limit: u32, ctx: &RequestContext) -> Fetched {
        let options = QueryOptions::new()
            .with_filter(FilterSpec::new().eq("featured", true))
            .with_limit(limit);
        self.destinations(options, ctx).await
    }

    pub async fn destination_slugs(&self, ctx: &RequestContext) -> Vec<String> {
        self.slugs(&destinations_spec(), ctx).await
    }
}
