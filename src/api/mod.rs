// src/api/mod.rs
//! CMS API interaction: the ability to execute one request against the
//! content API.
//!
//! This module separates I/O ([`CmsHttpClient`]) from parsing
//! ([`parser`]); business logic depends only on the [`Transport`] trait.

pub mod client;
pub mod parser;
mod responses;
pub mod types;

use crate::error::AppError;
use crate::types::Credential;
use serde_json::Value;

/// The ability to execute one GET against the CMS.
///
/// The credential is a per-call argument: a public and an elevated context
/// differ only in which credential they pass, never in which transport they
/// use. Implementations perform exactly one request, no retries and no
/// caching.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Executes `GET {base}/{endpoint}?{query}` and returns the JSON body.
    async fn execute(
        &self,
        endpoint: &str,
        query: &str,
        credential: &Credential,
    ) -> Result<Value, AppError>;
}

pub use client::CmsHttpClient;
pub use responses::ResponseMeta;
pub use types::CollectionPayload;
