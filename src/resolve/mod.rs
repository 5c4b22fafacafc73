// src/resolve/mod.rs
//! Pure resolvers that turn raw CMS records into what the site renders:
//! translations overlaid for the request locale and asset identifiers
//! turned into URLs. Nothing here performs I/O or fails.

pub mod asset;
pub mod locale;
pub mod normalize;

pub use asset::{is_resolved, AssetResolver, AssetTransform};
pub use locale::{resolve_locale, resolve_request};
pub use normalize::{ImageField, ItemNormalizer};
