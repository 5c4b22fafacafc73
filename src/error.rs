// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the content layer.
//! Transport and parsing produce [`AppError`]; the collection fetchers turn
//! those into caller-safe defaults tagged with a [`FetchDiagnostic`].

use std::fmt;
use thiserror::Error;

/// CMS error codes as a typed vocabulary.
///
/// The CMS reports failures as `{"errors":[{"message":..,"extensions":{"code":..}}]}`.
/// Matching on this enum instead of raw strings keeps retry and
/// classification decisions in the type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmsErrorCode {
    /// The credential lacks permission for this collection or item
    Forbidden,
    /// The bearer token was rejected
    InvalidCredentials,
    /// The bearer token has expired
    TokenExpired,
    /// Filter, field or sort parameters failed validation
    InvalidQuery,
    /// The endpoint or collection does not exist
    RouteNotFound,
    /// Rate limit exceeded
    RequestsExceeded,
    /// The CMS is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl CmsErrorCode {
    /// Parse a CMS `extensions.code` string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "FORBIDDEN" => Self::Forbidden,
            "INVALID_CREDENTIALS" => Self::InvalidCredentials,
            "TOKEN_EXPIRED" => Self::TokenExpired,
            "INVALID_QUERY" | "INVALID_PAYLOAD" => Self::InvalidQuery,
            "ROUTE_NOT_FOUND" => Self::RouteNotFound,
            "REQUESTS_EXCEEDED" => Self::RequestsExceeded,
            "SERVICE_UNAVAILABLE" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body carries no code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 => Self::InvalidCredentials,
            403 => Self::Forbidden,
            404 => Self::RouteNotFound,
            429 => Self::RequestsExceeded,
            503 => Self::ServiceUnavailable,
            other => Self::HttpStatus(other),
        }
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestsExceeded | Self::ServiceUnavailable => true,
            Self::HttpStatus(status) => matches!(status, 502 | 504),
            _ => false,
        }
    }

    /// Whether the credential was refused rather than the request itself.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Forbidden | Self::InvalidCredentials | Self::TokenExpired
        )
    }
}

impl fmt::Display for CmsErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::InvalidQuery => write!(f, "INVALID_QUERY"),
            Self::RouteNotFound => write!(f, "ROUTE_NOT_FOUND"),
            Self::RequestsExceeded => write!(f, "REQUESTS_EXCEEDED"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
            Self::HttpStatus(code) => write!(f, "HTTP_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: String },

    #[error("CMS returned an error ({status}, {code}): {message}")]
    CmsService {
        status: u16,
        code: CmsErrorCode,
        message: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// HTTP status carried by the error, if the CMS answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::CmsService { status, .. } => Some(*status),
            Self::NetworkFailure(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::NetworkFailure(err) => err.is_timeout() || err.is_connect(),
            Self::CmsService { code, .. } => code.is_retryable(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Domain vocabulary for why a collection fetch degraded to its default.
///
/// This is not an error type. It travels with the empty result so a higher
/// layer can decide whether to surface a message, without the content layer
/// inventing placeholder content.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchDiagnostic {
    /// The credential was refused for this collection.
    AccessDenied { collection: String, reason: String },
    /// The CMS could not be reached or kept failing after retries.
    Unavailable { collection: String, cause: String },
    /// The CMS answered but the payload was not usable.
    Malformed { collection: String, cause: String },
    /// The CMS rejected the query itself.
    Rejected { collection: String, reason: String },
}

impl FetchDiagnostic {
    pub fn collection(&self) -> &str {
        match self {
            Self::AccessDenied { collection, .. }
            | Self::Unavailable { collection, .. }
            | Self::Malformed { collection, .. }
            | Self::Rejected { collection, .. } => collection,
        }
    }
}

impl fmt::Display for FetchDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessDenied { collection, reason } => {
                write!(f, "access denied to '{}': {}", collection, reason)
            }
            Self::Unavailable { collection, cause } => {
                write!(f, "'{}' unavailable: {}", collection, cause)
            }
            Self::Malformed { collection, cause } => {
                write!(f, "malformed '{}' response: {}", collection, cause)
            }
            Self::Rejected { collection, reason } => {
                write!(f, "query on '{}' rejected: {}", collection, reason)
            }
        }
    }
}

/// Classifies a fetch error into the diagnostic attached to a degraded result.
pub fn classify_fetch_failure(collection: &str, error: &AppError) -> FetchDiagnostic {
    let collection = collection.to_string();
    match error {
        AppError::CmsService { code, message, .. } if code.is_auth_failure() => {
            FetchDiagnostic::AccessDenied {
                collection,
                reason: message.clone(),
            }
        }
        AppError::CmsService {
            code: CmsErrorCode::InvalidQuery,
            message,
            ..
        } => FetchDiagnostic::Rejected {
            collection,
            reason: message.clone(),
        },
        AppError::MalformedResponse(cause) => FetchDiagnostic::Malformed {
            collection,
            cause: cause.clone(),
        },
        other => FetchDiagnostic::Unavailable {
            collection,
            cause: other.to_string(),
        },
    }
}
