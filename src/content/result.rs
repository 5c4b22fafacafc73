// src/content/result.rs
//! What collection fetchers hand back: data, counts, a freshness stamp and,
//! when the fetch degraded, the reason why.

use crate::constants::CONTENT_FRESHNESS_SECS;
use crate::error::FetchDiagnostic;
use crate::model::CmsItem;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Counts describing a collection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FetchMeta {
    /// Items in this result
    pub returned: usize,
    /// Items matching the query upstream, when the CMS reported it
    pub total: Option<u64>,
}

impl FetchMeta {
    /// Whether more items exist beyond this result.
    pub fn has_more(&self) -> bool {
        self.total
            .is_some_and(|total| total > self.returned as u64)
    }
}

/// A collection fetch result. Never an error: a failed fetch is an empty
/// result carrying a diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fetched<T = CmsItem> {
    pub data: Vec<T>,
    pub meta: FetchMeta,
    pub fetched_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_diagnostic")]
    pub diagnostic: Option<FetchDiagnostic>,
}

impl<T> Fetched<T> {
    pub fn new(data: Vec<T>, total: Option<u64>) -> Self {
        let returned = data.len();
        Self {
            data,
            meta: FetchMeta { returned, total },
            fetched_at: Utc::now(),
            diagnostic: None,
        }
    }

    /// The empty result returned when a fetch failed.
    pub fn degraded(diagnostic: FetchDiagnostic) -> Self {
        Self {
            data: Vec::new(),
            meta: FetchMeta::default(),
            fetched_at: Utc::now(),
            diagnostic: Some(diagnostic),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.diagnostic.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn serialize_diagnostic<S>(diagnostic: &Option<FetchDiagnostic>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match diagnostic {
        Some(diagnostic) => serializer.serialize_str(&diagnostic.to_string()),
        None => serializer.serialize_none(),
    }
}

/// How long a result may be served from an external cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    pub max_age: Duration,
}

impl FreshnessPolicy {
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }

    pub fn fresh_until(&self, fetched_at: DateTime<Utc>) -> DateTime<Utc> {
        fetched_at + self.max_age
    }

    /// Degraded results are never fresh, so a cache retries them.
    pub fn is_fresh<T>(&self, result: &Fetched<T>, now: DateTime<Utc>) -> bool {
        !result.is_degraded() && now < self.fresh_until(result.fetched_at)
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::new(Duration::seconds(CONTENT_FRESHNESS_SECS))
    }
}
