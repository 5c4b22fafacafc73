// src/content/mod.rs
//! Collection fetchers: domain façades over query building, transport and
//! normalization.
//!
//! Every fetcher follows the same sequence: layer the caller's options over
//! the collection's [`CollectionSpec`], build the query string, execute it
//! with the request's credential, check the envelope, normalize, and
//! optionally enrich. Failures stop here: they are logged with endpoint and
//! locale and turned into `None` or an empty [`Fetched`] with a diagnostic.

pub mod categories;
pub mod destinations;
pub mod hotels;
pub mod navigation;
pub mod pages;
mod result;
pub mod rooms;
mod spec;
pub mod translations;

pub use navigation::nest_navigation;
pub use result::{FetchMeta, Fetched, FreshnessPolicy};
pub use spec::CollectionSpec;
pub use translations::UiStrings;

use crate::api::{parser, CollectionPayload, Transport};
use crate::constants::SLUG_PAGE_SIZE;
use crate::error::{classify_fetch_failure, AppError};
use crate::error_recovery::{retry_with_backoff, RetryPolicy};
use crate::model::CmsItem;
use crate::query::{build, FilterSpec, QueryOptions};
use crate::resolve::ItemNormalizer;
use crate::types::{Credential, Locale, LocaleRequest};
use std::sync::Arc;

/// Count requested alongside collection results.
const COUNT_META: &str = "filter_count";

/// Per-request inputs: who is asking and in which language.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub locale: LocaleRequest,
    pub credential: Credential,
}

impl RequestContext {
    pub fn new(locale: Locale, credential: Credential) -> Self {
        Self {
            locale: LocaleRequest::new(locale),
            credential,
        }
    }

    pub fn with_fallback(self, fallback: Locale) -> Self {
        Self {
            locale: self.locale.with_fallback(fallback),
            ..self
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale.requested
    }
}

/// Entry point to every collection fetcher.
#[derive(Clone)]
pub struct ContentClient {
    transport: Arc<dyn Transport>,
    normalizer: ItemNormalizer,
    retry: RetryPolicy,
}

impl ContentClient {
    pub fn new(transport: Arc<dyn Transport>, normalizer: ItemNormalizer) -> Self {
        Self {
            transport,
            normalizer,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(self, retry: RetryPolicy) -> Self {
        Self { retry, ..self }
    }

    /// Fetches and normalizes a collection; never fails.
    pub async fn fetch_collection(
        &self,
        spec: &CollectionSpec,
        options: QueryOptions,
        ctx: &RequestContext,
    ) -> Fetched {
        let options = if options.meta.is_none() {
            options.with_meta(COUNT_META)
        } else {
            options
        };

        match self.try_fetch(spec, options, ctx).await {
            Ok(payload) => {
                let total = payload.total();
                Fetched::new(payload.items, total)
            }
            Err(err) => Fetched::degraded(classify_fetch_failure(spec.name, &err)),
        }
    }

    /// Fetches the first item matching `filter`; `None` when nothing matches
    /// or the fetch failed.
    pub async fn fetch_one(
        &self,
        spec: &CollectionSpec,
        filter: FilterSpec,
        ctx: &RequestContext,
    ) -> Option<CmsItem> {
        let options = QueryOptions::new().with_filter(filter).with_limit(1);
        match self.try_fetch(spec, options, ctx).await {
            Ok(payload) => {
                let item = payload.items.into_iter().next();
                if item.is_none() {
                    log::debug!("No {} item matched (locale {})", spec.name, ctx.locale());
                }
                item
            }
            Err(_) => None,
        }
    }

    /// Single item by its `slug` field.
    pub async fn by_slug(
        &self,
        spec: &CollectionSpec,
        slug: &str,
        ctx: &RequestContext,
    ) -> Option<CmsItem> {
        self.fetch_one(spec, FilterSpec::new().eq("slug", slug), ctx)
            .await
    }

    /// Single item by its `id`.
    pub async fn by_id(
        &self,
        spec: &CollectionSpec,
        id: &str,
        ctx: &RequestContext,
    ) -> Option<CmsItem> {
        self.fetch_one(spec, FilterSpec::new().eq("id", id), ctx)
            .await
    }

    /// Every slug in a collection, for static path generation.
    ///
    /// Pages through the collection until the reported count is reached or
    /// a short page comes back. A failed page ends the walk with what was
    /// collected so far.
    pub async fn slugs(&self, spec: &CollectionSpec, ctx: &RequestContext) -> Vec<String> {
        let mut slugs = Vec::new();
        let mut seen: u64 = 0;
        let mut page = 1;

        loop {
            let options = QueryOptions::new()
                .with_fields("slug")
                .with_page(page, SLUG_PAGE_SIZE);
            let fetched = self.fetch_collection(spec, options, ctx).await;
            if let Some(diagnostic) = &fetched.diagnostic {
                log::error!(
                    "Slug listing for {} stopped at page {} with {} slugs: {}",
                    spec.name,
                    page,
                    slugs.len(),
                    diagnostic
                );
                break;
            }

            seen += fetched.meta.returned as u64;
            slugs.extend(
                fetched
                    .data
                    .iter()
                    .filter_map(|item| item.str_field("slug").map(str::to_string)),
            );

            let more = match fetched.meta.total {
                Some(total) => seen < total,
                None => fetched.meta.returned >= SLUG_PAGE_SIZE as usize,
            };
            if fetched.is_empty() || !more {
                break;
            }
            page += 1;
        }

        slugs
    }

    /// The fallible path shared by every fetcher. Errors are logged here,
    /// once, with the failing endpoint and locale.
    async fn try_fetch(
        &self,
        spec: &CollectionSpec,
        options: QueryOptions,
        ctx: &RequestContext,
    ) -> Result<CollectionPayload, AppError> {
        let endpoint = spec.endpoint();
        let query = build(&spec.query(options));

        let result = retry_with_backoff(
            || self.transport.execute(&endpoint, &query, &ctx.credential),
            self.retry,
        )
        .await
        .and_then(parser::parse_collection);

        match result {
            Ok(payload) => Ok(CollectionPayload {
                items: self.normalize(spec, &payload.items, ctx),
                meta: payload.meta,
            }),
            Err(err) => {
                log::error!(
                    "Fetching {}?{} failed (locale {}, {}): {}",
                    endpoint,
                    query,
                    ctx.locale(),
                    ctx.credential.scope(),
                    err
                );
                Err(err)
            }
        }
    }

    fn normalize(&self, spec: &CollectionSpec, items: &[CmsItem], ctx: &RequestContext) -> Vec<CmsItem> {
        let normalized = self
            .normalizer
            .normalize_many(items, &ctx.locale, &spec.image_fields);
        if spec.localized_relations.is_empty() {
            return normalized;
        }
        normalized
            .iter()
            .map(|item| {
                self.normalizer
                    .localize_relations(item, &ctx.locale, &spec.localized_relations)
            })
            .collect()
    }
}
