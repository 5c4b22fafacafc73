// src/types/locale.rs
//! Language tags used to pick translation records.

use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static LOCALE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(?:[-_][A-Za-z0-9]{2,8})*$")
        .expect("Failed to compile locale regex - this is a bug in the code")
});

/// A validated language tag such as `de-DE`, `en` or `fr-CH`.
///
/// Tags are compared exactly as the CMS stores them; no case folding or
/// region stripping happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Result<Self, ValidationError> {
        let tag = tag.into();
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField("locale"));
        }
        if !LOCALE_TAG.is_match(trimmed) {
            return Err(ValidationError::InvalidLocale(tag));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a translation record's tag names this locale.
    pub fn matches(&self, tag: &str) -> bool {
        self.0 == tag
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Locale::new(value).map_err(serde::de::Error::custom)
    }
}

/// The requested locale together with the optional locale to fall back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRequest {
    pub requested: Locale,
    pub fallback: Option<Locale>,
}

impl LocaleRequest {
    pub fn new(requested: Locale) -> Self {
        Self {
            requested,
            fallback: None,
        }
    }

    pub fn with_fallback(self, fallback: Locale) -> Self {
        Self {
            fallback: Some(fallback),
            ..self
        }
    }
}
