// src/content/hotels.rs
//! Hotels: listings, detail pages with their rooms, and destination views.

use super::{CollectionSpec, ContentClient, Fetched, RequestContext};
use crate::model::CmsItem;
use crate::query::{DeepFilterSpec, FilterSpec, QueryOptions};
use crate::resolve::{AssetTransform, ImageField};
use serde_json::Value;

/// Field the enriched detail view stores the hotel's rooms under.
pub const ROOMS_FIELD: &str = "rooms";

pub fn hotels_spec() -> CollectionSpec {
    CollectionSpec::new("hotels")
        .published_only()
        .fields(&[
            "*",
            "translations.*",
            "destination.id",
            "destination.slug",
            "destination.title",
            "destination.translations.*",
            "category.id",
            "category.slug",
            "category.translations.*",
        ])
        .images(vec![
            ImageField::from("hero_image").with_transform(AssetTransform::new().width(1600)),
            ImageField::from("thumbnail").with_transform(AssetTransform::new().width(600).height(400)),
            ImageField::from("gallery"),
        ])
        .sorted_by("-date_created")
        .localize(&["destination", "category"])
}

impl ContentClient {
    /// Published hotels, newest first unless the caller sorts otherwise.
    pub async fn hotels(&self, options: QueryOptions, ctx: &RequestContext) -> Fetched {
        self.fetch_collection(&hotels_spec(), options, ctx).await
    }

    /// Hotel detail: the hotel plus its published rooms under `rooms`.
    pub async fn hotel_by_slug(&self, slug: &str, ctx: &RequestContext) -> Option<CmsItem> {
        let hotel = self.by_slug(&hotels_spec(), slug, ctx).await?;
        Some(self.attach_rooms(hotel, ctx).await)
    }

    pub async fn hotel_by_id(&self, id: &str, ctx: &RequestContext) -> Option<CmsItem> {
        let hotel = self.by_id(&hotels_spec(), id, ctx).await?;
        Some(self.attach_rooms(hotel, ctx).await)
    }

    /// Hotels whose destination has the given slug, filtered through the
    /// relation instead of fetching the destination first.
    pub async fn hotels_in_destination(
        &self,
        destination_slug: &str,
        options: QueryOptions,
        ctx: &RequestContext,
    ) -> Fetched {
        let deep = DeepFilterSpec::new().relation(
            "destination",
            FilterSpec::new().eq("slug", destination_slug),
        );
        let options = QueryOptions {
            deep: deep.merged_over(&options.deep),
            ..options
        };
        self.hotels(options, ctx).await
    }

    pub async fn featured_hotels(&self, limit: u32, ctx: &RequestContext) -> Fetched {
        let options = QueryOptions::new()
            .with_filter(FilterSpec::new().eq("featured", true))
            .with_limit(limit);
        self.hotels(options, ctx).await
    }

    /// Other hotels in the same destination as `hotel`.
    pub async fn related_hotels(&self, hotel: &CmsItem, limit: u32, ctx: &RequestContext) -> Fetched {
        let destination_id = hotel
            .get("destination")
            .and_then(|destination| match destination {
                Value::Object(fields) => fields.get("id").cloned(),
                other => Some(other.clone()),
            })
            .filter(|id| !id.is_null());
        let (Some(destination_id), Some(hotel_id)) = (destination_id, hotel.id().cloned()) else {
            return Fetched::new(Vec::new(), None);
        };

        let filter = FilterSpec::new()
            .eq("destination", destination_id)
            .op("id", "_neq", hotel_id);
        self.hotels(QueryOptions::new().with_filter(filter).with_limit(limit), ctx)
            .await
    }

    pub async fn hotel_slugs(&self, ctx: &RequestContext) -> Vec<String> {
        self.slugs(&hotels_spec(), ctx).await
    }

    async fn attach_rooms(&self, hotel: CmsItem, ctx: &RequestContext) -> CmsItem {
        let Some(hotel_id) = hotel.id_string() else {
            return hotel;
        };
        let rooms = self.rooms_for_hotel(&hotel_id, ctx).await;
        let rooms = Value::Array(rooms.data.into_iter().map(CmsItem::into_value).collect());
        hotel.with_field(ROOMS_FIELD, rooms)
    }
}
