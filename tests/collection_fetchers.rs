//! Collection fetchers against a recording in-memory transport.
//!
//! The transport answers per endpoint and keeps every request it saw, so
//! these tests check both the queries the fetchers build and what they do
//! with the answers.

use async_trait::async_trait;
use content_resolver::{
    AppError, AssetResolver, CmsErrorCode, ContentClient, Credential, CredentialScope,
    FetchDiagnostic, FilterSpec, FreshnessPolicy, ItemNormalizer, Locale, QueryOptions,
    RequestContext, RetryPolicy, Transport,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
enum Reply {
    Json(Value),
    Forbidden,
    Timeout,
}

#[derive(Debug, Clone)]
struct Recorded {
    endpoint: String,
    query: String,
    scope: CredentialScope,
}

#[derive(Default)]
struct RecordingTransport {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<Recorded>>,
}

impl RecordingTransport {
    fn reply(mut self, endpoint: &str, reply: Reply) -> Self {
        self.replies.insert(endpoint.to_string(), reply);
        self
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn requests_to(&self, endpoint: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.endpoint == endpoint)
            .collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(
        &self,
        endpoint: &str,
        query: &str,
        credential: &Credential,
    ) -> Result<Value, AppError> {
        self.requests.lock().unwrap().push(Recorded {
            endpoint: endpoint.to_string(),
            query: query.to_string(),
            scope: credential.scope(),
        });
        match self.replies.get(endpoint) {
            Some(Reply::Json(body)) => Ok(body.clone()),
            Some(Reply::Forbidden) => Err(AppError::CmsService {
                status: 403,
                code: CmsErrorCode::Forbidden,
                message: "You don't have permission to access this.".to_string(),
            }),
            Some(Reply::Timeout) => Err(AppError::Timeout {
                endpoint: endpoint.to_string(),
            }),
            None => Ok(json!({ "data": [] })),
        }
    }
}

fn client(transport: &Arc<RecordingTransport>) -> ContentClient {
    let normalizer = ItemNormalizer::new(AssetResolver::new("https://cms.example.com").unwrap());
    let transport: Arc<dyn Transport> = transport.clone();
    ContentClient::new(transport, normalizer).with_retry(RetryPolicy {
        max_attempts: 2,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
    })
}

fn public_ctx(locale: &str) -> RequestContext {
    RequestContext::new(
        Locale::new(locale).unwrap(),
        Credential::public("public-token").unwrap(),
    )
}

fn alpina() -> Value {
    json!({
        "id": 7,
        "slug": "alpina",
        "title": "Alpina",
        "status": "published",
        "hero_image": "hero-1",
        "destination": {
            "id": 3,
            "slug": "alps",
            "title": "Alps",
            "translations": [
                { "languages_code": "de-DE", "title": "Alpen" }
            ]
        },
        "translations": [
            { "id": 70, "hotels_id": 7, "languages_code": "de-DE", "title": "Alpina DE", "summary": null }
        ]
    })
}

#[tokio::test]
async fn hotel_listing_injects_published_filter_and_count() {
    let transport = Arc::new(RecordingTransport::default().reply(
        "items/hotels",
        Reply::Json(json!({ "data": [alpina()], "meta": { "filter_count": 12 } })),
    ));

    let hotels = client(&transport)
        .hotels(QueryOptions::new().with_limit(1), &public_ctx("en-US"))
        .await;

    assert_eq!(hotels.data.len(), 1);
    assert_eq!(hotels.meta.total, Some(12));
    assert!(hotels.meta.has_more());

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let query = &requests[0].query;
    assert!(query.starts_with("filter[status][_eq]=published&fields=*,translations.*"));
    assert!(query.ends_with("limit=1&sort=-date_created&meta=filter_count"));
    assert_eq!(requests[0].scope, CredentialScope::Public);
}

#[tokio::test]
async fn caller_filter_overrides_published_with_elevated_credential() {
    let transport = Arc::new(RecordingTransport::default());
    let ctx = RequestContext::new(
        Locale::new("en-US").unwrap(),
        Credential::elevated("admin-token").unwrap(),
    );

    client(&transport)
        .pages(
            QueryOptions::new().with_filter(FilterSpec::new().eq("status", "draft")),
            &ctx,
        )
        .await;

    let requests = transport.requests_to("items/pages");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].query.starts_with("filter[status][_eq]=draft&"));
    assert!(!requests[0].query.contains("published"));
    assert_eq!(requests[0].scope, CredentialScope::Elevated);
}

#[tokio::test]
async fn hotel_by_slug_attaches_localized_rooms() {
    let transport = Arc::new(
        RecordingTransport::default()
            .reply("items/hotels", Reply::Json(json!({ "data": [alpina()] })))
            .reply(
                "items/rooms",
                Reply::Json(json!({ "data": [
                    {
                        "id": 11,
                        "hotel": 7,
                        "name": "Suite",
                        "image": "room-11",
                        "translations": [
                            { "languages_code": "de-DE", "name": "Suite DE" }
                        ]
                    }
                ]})),
            ),
    );

    let hotel = client(&transport)
        .hotel_by_slug("alpina", &public_ctx("de-DE"))
        .await
        .expect("hotel should be found");

    assert_eq!(hotel.str_field("title"), Some("Alpina DE"));
    assert_eq!(hotel.get("id"), Some(&json!(7)));
    assert_eq!(hotel["destination"]["title"], "Alpen");
    assert_eq!(
        hotel.str_field("hero_image_url"),
        Some("https://cms.example.com/assets/hero-1?width=1600&quality=80&format=webp&fit=cover")
    );
    assert_eq!(hotel["rooms"][0]["name"], "Suite DE");
    assert_eq!(
        hotel["rooms"][0]["image_url"],
        "https://cms.example.com/assets/room-11?width=900&quality=80&format=webp&fit=cover"
    );

    let hotel_query = &transport.requests_to("items/hotels")[0].query;
    assert!(hotel_query.starts_with("filter[status][_eq]=published&filter[slug][_eq]=alpina&"));
    assert!(hotel_query.contains("&limit=1&"));

    let rooms = transport.requests_to("items/rooms");
    assert_eq!(rooms.len(), 1);
    assert!(rooms[0]
        .query
        .starts_with("filter[status][_eq]=published&filter[hotel][_eq]=7&"));
}

#[tokio::test]
async fn unknown_slug_is_none_without_enrichment() {
    let transport = Arc::new(
        RecordingTransport::default().reply("items/hotels", Reply::Json(json!({ "data": [] }))),
    );

    let hotel = client(&transport)
        .hotel_by_slug("nowhere", &public_ctx("en-US"))
        .await;

    assert!(hotel.is_none());
    assert!(transport.requests_to("items/rooms").is_empty());
}

#[tokio::test]
async fn forbidden_single_item_is_none() {
    let transport = Arc::new(RecordingTransport::default().reply("items/pages", Reply::Forbidden));

    let page = client(&transport)
        .page_by_slug("about", &public_ctx("en-US"))
        .await;

    assert!(page.is_none());
    // Permission errors are not retried
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn unreachable_navigation_is_empty_with_diagnostic() {
    let transport =
        Arc::new(RecordingTransport::default().reply("items/navigation", Reply::Timeout));

    let menu = client(&transport)
        .navigation("main", &public_ctx("en-US"))
        .await;

    assert!(menu.data.is_empty());
    assert!(menu.is_degraded());
    assert!(matches!(
        menu.diagnostic,
        Some(FetchDiagnostic::Unavailable { ref collection, .. }) if collection == "navigation"
    ));
    assert!(!FreshnessPolicy::default().is_fresh(&menu, chrono::Utc::now()));
    // Timeouts are retried once with the policy above
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn hotels_in_destination_filters_through_relation() {
    let transport = Arc::new(RecordingTransport::default());

    client(&transport)
        .hotels_in_destination("alps", QueryOptions::new(), &public_ctx("en-US"))
        .await;

    let query = &transport.requests_to("items/hotels")[0].query;
    assert!(query.contains("&deep[destination][slug][_eq]=alps&"));
}

#[tokio::test]
async fn related_hotels_exclude_the_hotel_itself() {
    let transport = Arc::new(RecordingTransport::default());
    let hotel = content_resolver::CmsItem::from_value(alpina()).unwrap();

    client(&transport)
        .related_hotels(&hotel, 3, &public_ctx("en-US"))
        .await;

    let query = &transport.requests_to("items/hotels")[0].query;
    assert!(query.starts_with(
        "filter[status][_eq]=published&filter[destination][_eq]=3&filter[id][_neq]=7&"
    ));
    assert!(query.contains("&limit=3&"));
}

#[tokio::test]
async fn destination_detail_carries_its_hotels() {
    let transport = Arc::new(
        RecordingTransport::default()
            .reply(
                "items/destinations",
                Reply::Json(json!({ "data": [{ "id": 3, "slug": "alps", "title": "Alps" }] })),
            )
            .reply("items/hotels", Reply::Json(json!({ "data": [alpina()] }))),
    );

    let destination = client(&transport)
        .destination_by_slug("alps", &public_ctx("en-US"))
        .await
        .unwrap();

    assert_eq!(destination.str_field("title"), Some("Alps"));
    assert_eq!(destination["hotels"][0]["slug"], "alpina");
}

#[tokio::test]
async fn slugs_request_only_the_slug_field() {
    let transport = Arc::new(RecordingTransport::default().reply(
        "items/destinations",
        Reply::Json(json!({ "data": [{ "slug": "alps" }, { "slug": "coast" }, { "id": 9 }] })),
    ));

    let slugs = client(&transport)
        .destination_slugs(&public_ctx("en-US"))
        .await;

    assert_eq!(slugs, vec!["alps".to_string(), "coast".to_string()]);
    assert!(transport.requests()[0].query.contains("fields=slug&"));
}

/// Serves `total` destinations, honouring `limit` and `offset` the way the
/// CMS does, and reports the full count.
struct PagedDestinations {
    total: usize,
    queries: Mutex<Vec<String>>,
}

fn query_param(query: &str, name: &str) -> Option<usize> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| value.parse().ok())
}

#[async_trait]
impl Transport for PagedDestinations {
    async fn execute(
        &self,
        _endpoint: &str,
        query: &str,
        _credential: &Credential,
    ) -> Result<Value, AppError> {
        self.queries.lock().unwrap().push(query.to_string());
        let offset = query_param(query, "offset").unwrap_or(0);
        let limit = query_param(query, "limit").unwrap_or(self.total);
        let data: Vec<Value> = (offset..self.total.min(offset + limit))
            .map(|n| json!({ "slug": format!("place-{n}") }))
            .collect();
        Ok(json!({ "data": data, "meta": { "filter_count": self.total } }))
    }
}

#[tokio::test]
async fn slugs_walk_every_page_of_a_large_collection() {
    let transport = Arc::new(PagedDestinations {
        total: 250,
        queries: Mutex::new(Vec::new()),
    });
    let normalizer = ItemNormalizer::new(AssetResolver::new("https://cms.example.com").unwrap());
    let client = ContentClient::new(transport.clone(), normalizer);

    let slugs = client.destination_slugs(&public_ctx("en-US")).await;

    assert_eq!(slugs.len(), 250);
    assert_eq!(slugs[0], "place-0");
    assert_eq!(slugs[249], "place-249");
    let offsets: Vec<Option<usize>> = transport
        .queries
        .lock()
        .unwrap()
        .iter()
        .map(|query| query_param(query, "offset"))
        .collect();
    assert_eq!(offsets, vec![Some(0), Some(100), Some(200)]);
}

#[tokio::test]
async fn destination_detail_survives_failed_hotel_listing() {
    let transport = Arc::new(
        RecordingTransport::default()
            .reply(
                "items/destinations",
                Reply::Json(json!({ "data": [{ "id": 3, "slug": "alps", "title": "Alps" }] })),
            )
            .reply("items/hotels", Reply::Forbidden),
    );

    let destination = client(&transport)
        .destination_by_slug("alps", &public_ctx("en-US"))
        .await
        .unwrap();

    assert_eq!(destination.str_field("title"), Some("Alps"));
    assert_eq!(destination["hotels"], json!([]));
    assert_eq!(transport.requests_to("items/hotels").len(), 1);
}

#[tokio::test]
async fn ui_strings_resolve_through_fallback_locale() {
    let transport = Arc::new(RecordingTransport::default().reply(
        "items/translations",
        Reply::Json(json!({ "data": [
            {
                "id": 1,
                "key": "book_now",
                "namespace": "booking",
                "value": "Book now",
                "translations": [
                    { "languages_code": "fr-FR", "value": "Réserver" }
                ]
            },
            {
                "id": 2,
                "key": "nights",
                "namespace": "booking",
                "value": "nights",
                "translations": []
            }
        ]})),
    ));
    let ctx = public_ctx("fr-CA").with_fallback(Locale::new("fr-FR").unwrap());

    let strings = client(&transport).ui_strings(Some("booking"), &ctx).await;

    assert_eq!(strings.get_or_key("book_now"), "Réserver");
    assert_eq!(strings.get_or_key("nights"), "nights");
    assert_eq!(strings.get_or_key("missing_key"), "missing_key");
    assert!(transport.requests()[0]
        .query
        .starts_with("filter[namespace][_eq]=booking&"));
}

#[tokio::test]
async fn categories_are_not_status_filtered() {
    let transport = Arc::new(RecordingTransport::default().reply(
        "items/categories",
        Reply::Json(json!({ "data": [{ "id": 4, "slug": "spa", "icon": "icon-spa" }] })),
    ));
    let client = client(&transport);
    let ctx = public_ctx("en-US");

    let category = client.category_by_slug("spa", &ctx).await.unwrap();
    client.categories(QueryOptions::new(), &ctx).await;

    assert_eq!(
        category.str_field("icon_url"),
        Some("https://cms.example.com/assets/icon-spa")
    );
    let requests = transport.requests_to("items/categories");
    assert_eq!(requests.len(), 2);
    assert!(requests[0].query.starts_with("filter[slug][_eq]=spa&"));
    assert!(requests.iter().all(|r| !r.query.contains("filter[status]")));
}
