// src/lib.rs
//! content-resolver library: the content layer between a headless,
//! multi-language CMS and the pages that render its content.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Query building**: `QueryOptions`, `FilterSpec`, `DeepFilterSpec`, `build`
//! - **Transport**: `Transport`, `CmsHttpClient`, response parsers
//! - **Resolution**: `AssetResolver`, `resolve_locale`, `ItemNormalizer`
//! - **Fetchers**: `ContentClient`, `RequestContext`, `Fetched`
//! - **Error handling**: `AppError`, `CmsErrorCode`, `FetchDiagnostic`
//! - **Configuration**: `ContentConfig`, `CommandLineInput`

pub mod api;
pub mod config;
mod constants;
pub mod content;
mod error;
mod error_recovery;
pub mod model;
pub mod query;
pub mod resolve;
pub mod types;

// --- Error Handling ---
pub use crate::error::{classify_fetch_failure, AppError, CmsErrorCode, FetchDiagnostic};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ContentConfig};
pub use crate::error_recovery::{retry_with_backoff, RetryPolicy};

// --- Domain Model ---
pub use crate::model::{CmsItem, TranslationOverlay, TranslationRecord};
pub use crate::types::{Credential, CredentialScope, Locale, LocaleRequest};

// --- Query Building ---
pub use crate::query::{build, DeepFilterSpec, FilterSpec, FilterValue, QueryOptions, Selection};

// --- Transport ---
pub use crate::api::{
    client::ApiResponse,
    parser::{parse_api_response, parse_collection},
    CmsHttpClient, CollectionPayload, ResponseMeta, Transport,
};

// --- Resolution ---
pub use crate::resolve::{
    resolve_locale, AssetResolver, AssetTransform, ImageField, ItemNormalizer,
};

// --- Fetchers ---
pub use crate::content::{
    nest_navigation, CollectionSpec, ContentClient, FetchMeta, Fetched, FreshnessPolicy,
    RequestContext, UiStrings,
};
