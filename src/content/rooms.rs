// src/content/rooms.rs
//! Rooms belong to a hotel and are fetched through it.

use super::{CollectionSpec, ContentClient, Fetched, RequestContext};
use crate::model::CmsItem;
use crate::query::{FilterSpec, QueryOptions};
use crate::resolve::{AssetTransform, ImageField};

pub fn rooms_spec() -> CollectionSpec {
    CollectionSpec::new("rooms")
        .published_only()
        .fields(&["*", "translations.*"])
        .images(vec![
            ImageField::from("image").with_transform(AssetTransform::new().width(900)),
            ImageField::from("gallery"),
        ])
        .sorted_by("sort")
}

impl ContentClient {
    /// Published rooms of one hotel in their manual sort order.
    pub async fn rooms_for_hotel(&self, hotel_id: &str, ctx: &RequestContext) -> Fetched {
        let options = QueryOptions::new().with_filter(FilterSpec::new().eq("hotel", hotel_id));
        self.fetch_collection(&rooms_spec(), options, ctx).await
    }

    pub async fn room_by_id(&self, id: &str, ctx: &RequestContext) -> Option<CmsItem> {
        self.by_id(&rooms_spec(), id, ctx).await
    }
}
