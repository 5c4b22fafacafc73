// src/api/client.rs
//! HTTP transport for the CMS API.
//!
//! A thin wrapper around reqwest: it joins the base origin with the
//! endpoint and query string, attaches the bearer credential it is handed
//! and reports what came back. Parsing lives in [`super::parser`].

use super::parser;
use crate::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::error::AppError;
use crate::types::Credential;
use reqwest::{header, Client, Response};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// reqwest-backed [`Transport`](super::Transport).
///
/// Holds no credential: the same client serves public and elevated
/// requests.
#[derive(Clone)]
pub struct CmsHttpClient {
    client: Client,
    base_url: String,
}

impl CmsHttpClient {
    /// Creates a client for the CMS at `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// Creates a client whose requests are abandoned after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let parsed = Url::parse(base_url).map_err(|e| AppError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::InvalidUrl {
                url: base_url.to_string(),
                reason: "CMS base URL must be http or https".to_string(),
            });
        }

        let client = Client::builder()
            .default_headers(Self::create_headers())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for CMS requests.
    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Full request URL for an endpoint and an already-built query string.
    pub fn endpoint_url(&self, endpoint: &str, query: &str) -> String {
        let endpoint = endpoint.trim_start_matches('/');
        if query.is_empty() {
            format!("{}/{}", self.base_url, endpoint)
        } else {
            format!("{}/{}?{}", self.base_url, endpoint, query)
        }
    }

    /// Makes a GET request with the given bearer credential.
    pub async fn get(
        &self,
        endpoint: &str,
        query: &str,
        credential: &Credential,
    ) -> Result<Response, AppError> {
        let url = self.endpoint_url(endpoint, query);
        log::debug!("GET {} ({})", url, credential.scope());

        let auth = header::HeaderValue::from_str(&credential.bearer()).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid credential format: {}", e))
        })?;

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout {
                        endpoint: endpoint.to_string(),
                    }
                } else {
                    AppError::NetworkFailure(e)
                }
            })?;

        log::debug!("{} -> {}", endpoint, response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::Transport for CmsHttpClient {
    async fn execute(
        &self,
        endpoint: &str,
        query: &str,
        credential: &Credential,
    ) -> Result<Value, AppError> {
        let response = self.get(endpoint, query, credential).await?;
        let result = extract_response_text(response).await.map_err(|e| match e {
            AppError::NetworkFailure(err) if err.is_timeout() => AppError::Timeout {
                endpoint: endpoint.to_string(),
            },
            other => other,
        })?;
        parser::parse_api_response(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joins_without_double_slashes() {
        let client = CmsHttpClient::new("https://cms.example.com/").unwrap();
        assert_eq!(
            client.endpoint_url("/items/hotels", "limit=1"),
            "https://cms.example.com/items/hotels?limit=1"
        );
        assert_eq!(
            client.endpoint_url("items/hotels", ""),
            "https://cms.example.com/items/hotels"
        );
    }

    #[test]
    fn rejects_non_http_base() {
        assert!(CmsHttpClient::new("file:///etc/passwd").is_err());
    }
}
