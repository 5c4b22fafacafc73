// src/api/responses.rs
//! Wire shapes of CMS responses that the parser reads with serde.

use serde::{Deserialize, Serialize};

/// Error body: `{"errors":[{"message":"..","extensions":{"code":".."}}]}`,
/// with a bare `{"message":".."}` accepted from proxies in front of the CMS.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEntry {
    pub message: String,
    pub extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorExtensions {
    pub code: Option<String>,
}

impl ErrorEnvelope {
    pub fn message(&self) -> Option<&str> {
        self.errors
            .first()
            .map(|entry| entry.message.as_str())
            .or(self.message.as_deref())
    }

    pub fn code(&self) -> Option<&str> {
        self.errors
            .first()
            .and_then(|entry| entry.extensions.as_ref())
            .and_then(|extensions| extensions.code.as_deref())
    }
}

/// Counts reported in the `meta` block when requested with `meta=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Items matching the filter
    pub filter_count: Option<u64>,
    /// Items in the collection regardless of filter
    pub total_count: Option<u64>,
}
