// src/api/types.rs
//! Parsed payload types handed from the API layer to the fetchers.

use super::responses::ResponseMeta;
use crate::model::CmsItem;

/// The `data` array of a collection response with its `meta` counts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectionPayload {
    pub items: Vec<CmsItem>,
    pub meta: ResponseMeta,
}

impl CollectionPayload {
    /// Total matching items when the CMS reported it.
    pub fn total(&self) -> Option<u64> {
        self.meta.filter_count.or(self.meta.total_count)
    }
}
