// src/resolve/asset.rs
//! Asset URL resolution.
//!
//! Identifiers that already look like a path or URL are returned as they
//! are; everything else is treated as a CMS file identifier and served from
//! `{origin}/assets/{id}` with optional transform parameters. Resolving a
//! resolved URL is therefore a no-op.

use crate::constants::{ASSETS_PATH, DEFAULT_ASSET_FIT, DEFAULT_ASSET_FORMAT, DEFAULT_ASSET_QUALITY};
use crate::error::AppError;
use crate::model::scalar_to_string;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::{form_urlencoded, Url};

static URI_SCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:")
        .expect("Failed to compile URI scheme regex - this is a bug in the code")
});

/// Server-side image derivation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssetTransform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u8>,
    pub format: Option<String>,
    pub fit: Option<String>,
}

impl AssetTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(self, width: u32) -> Self {
        Self {
            width: Some(width),
            ..self
        }
    }

    pub fn height(self, height: u32) -> Self {
        Self {
            height: Some(height),
            ..self
        }
    }

    pub fn quality(self, quality: u8) -> Self {
        Self {
            quality: Some(quality),
            ..self
        }
    }

    pub fn format(self, format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
            ..self
        }
    }

    pub fn fit(self, fit: impl Into<String>) -> Self {
        Self {
            fit: Some(fit.into()),
            ..self
        }
    }

    /// Query parameters with defaults filled in for quality, format and fit.
    fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(width) = self.width {
            query.append_pair("width", &width.to_string());
        }
        if let Some(height) = self.height {
            query.append_pair("height", &height.to_string());
        }
        query.append_pair(
            "quality",
            &self.quality.unwrap_or(DEFAULT_ASSET_QUALITY).to_string(),
        );
        query.append_pair("format", self.format.as_deref().unwrap_or(DEFAULT_ASSET_FORMAT));
        query.append_pair("fit", self.fit.as_deref().unwrap_or(DEFAULT_ASSET_FIT));
        query.finish()
    }
}

/// Whether an identifier is already a root-relative path or an absolute URL.
pub fn is_resolved(identifier: &str) -> bool {
    identifier.starts_with('/') || URI_SCHEME.is_match(identifier)
}

/// Turns file identifiers into absolute asset URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    origin: String,
}

impl AssetResolver {
    /// Creates a resolver serving assets from `origin` (scheme and host,
    /// optionally with a path prefix).
    pub fn new(origin: &str) -> Result<Self, AppError> {
        let parsed = Url::parse(origin).map_err(|e| AppError::InvalidUrl {
            url: origin.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::InvalidUrl {
                url: origin.to_string(),
                reason: "asset origin must be http or https".to_string(),
            });
        }
        Ok(Self {
            origin: origin.trim_end_matches('/').to_string(),
        })
    }

    /// Resolves an identifier to a URL. `None` for an empty or absent
    /// identifier; the transform is ignored for already-resolved inputs.
    pub fn resolve(&self, identifier: Option<&str>, transform: Option<&AssetTransform>) -> Option<String> {
        let identifier = identifier.map(str::trim).filter(|id| !id.is_empty())?;

        if is_resolved(identifier) {
            return Some(identifier.to_string());
        }

        let base = format!("{}/{}/{}", self.origin, ASSETS_PATH, identifier);
        Some(match transform {
            Some(transform) => format!("{}?{}", base, transform.to_query()),
            None => base,
        })
    }

    /// Resolves an image field value: a bare identifier (string or number),
    /// or an object whose `id` is the identifier (an expanded file relation).
    pub fn resolve_value(&self, value: &Value, transform: Option<&AssetTransform>) -> Option<String> {
        let id = match value {
            Value::Object(file) => scalar_to_string(file.get("id")?),
            other => scalar_to_string(other),
        }?;
        self.resolve(Some(&id), transform)
    }
}
