// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// CMS API boundaries
// ---------------------------------------------------------------------------

/// Path prefix under which every collection is served.
pub const ITEMS_ENDPOINT_PREFIX: &str = "items";

/// Value of the `status` field for content visible on the public site.
pub const PUBLISHED_STATUS: &str = "published";

/// Field that carries the translation overlay on a translatable item.
pub const TRANSLATIONS_FIELD: &str = "translations";

/// How long a single request may take before it is abandoned.
///
/// A timeout is a transient failure and eligible for retry by the fetch layer.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// How many times the fetch layer attempts a request before degrading.
pub const DEFAULT_FETCH_ATTEMPTS: u32 = 2;

/// First backoff delay between fetch attempts.
pub const RETRY_INITIAL_DELAY_MS: u64 = 200;

/// Ceiling for the backoff delay between fetch attempts.
pub const RETRY_MAX_DELAY_MS: u64 = 2_000;

/// Items per request when walking a whole collection (slug listings).
pub const SLUG_PAGE_SIZE: u32 = 100;

// ---------------------------------------------------------------------------
// Freshness
// ---------------------------------------------------------------------------

/// How long normalized results may be reused by an external cache.
///
/// The content layer itself never caches; it only stamps results.
pub const CONTENT_FRESHNESS_SECS: i64 = 3_600;

// ---------------------------------------------------------------------------
// Asset transforms
// ---------------------------------------------------------------------------

/// Path segment under which the CMS serves files.
pub const ASSETS_PATH: &str = "assets";

/// Quality applied to every transformed asset unless overridden.
pub const DEFAULT_ASSET_QUALITY: u8 = 80;

/// Output format applied to every transformed asset unless overridden.
pub const DEFAULT_ASSET_FORMAT: &str = "webp";

/// Fit mode applied to every transformed asset unless overridden.
pub const DEFAULT_ASSET_FIT: &str = "cover";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
