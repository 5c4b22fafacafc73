// src/types/mod.rs
//! Validated domain newtypes shared by the query, transport and
//! normalization layers.

use thiserror::Error;

mod credential;
mod locale;

pub use credential::*;
pub use locale::*;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid locale tag: {0}")]
    InvalidLocale(String),

    #[error("Invalid credential: {reason}")]
    InvalidCredential { reason: String },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),
}
