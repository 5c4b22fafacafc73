// src/api/parser.rs
//! Response parsing: status-aware JSON decoding and envelope checks.

use super::client::ApiResponse;
use super::responses::{ErrorEnvelope, ResponseMeta};
use super::types::CollectionPayload;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, CmsErrorCode};
use crate::model::CmsItem;
use serde_json::Value;

/// Turns a raw HTTP response into JSON, or into the CMS's error.
pub fn parse_api_response(result: ApiResponse<String>) -> Result<Value, AppError> {
    if (200..300).contains(&result.status) {
        parse_json_body(&result.data, &result.url)
    } else {
        Err(parse_error_body(&result.data, result.status, &result.url))
    }
}

fn parse_json_body(body: &str, url: &str) -> Result<Value, AppError> {
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

/// Builds the error for a non-2xx response, keeping the upstream message
/// when the body is parseable.
fn parse_error_body(body: &str, status: u16, url: &str) -> AppError {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if let Some(message) = envelope.message() {
            let code = envelope
                .code()
                .map(CmsErrorCode::from_api_response)
                .unwrap_or_else(|| CmsErrorCode::from_http_status(status));
            return AppError::CmsService {
                status,
                code,
                message: message.to_string(),
            };
        }
    }

    AppError::CmsService {
        status,
        code: CmsErrorCode::from_http_status(status),
        message: format!("HTTP {} from {}", status, url),
    }
}

/// Reads the `data` array and `meta` block of a collection response.
pub fn parse_collection(body: Value) -> Result<CollectionPayload, AppError> {
    let Value::Object(mut envelope) = body else {
        return Err(AppError::MalformedResponse(
            "Response is not a JSON object".to_string(),
        ));
    };

    let items = match envelope.remove("data") {
        Some(Value::Array(data)) => data
            .into_iter()
            .map(|entry| {
                CmsItem::from_value(entry).ok_or_else(|| {
                    AppError::MalformedResponse("Collection entry is not an object".to_string())
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        // A singleton collection answers with one object
        Some(Value::Object(single)) => vec![CmsItem::new(single)],
        Some(Value::Null) => Vec::new(),
        Some(_) => {
            return Err(AppError::MalformedResponse(
                "'data' is neither an array nor an object".to_string(),
            ))
        }
        None => {
            return Err(AppError::MalformedResponse(
                "Missing 'data' field in response".to_string(),
            ))
        }
    };

    let meta = match envelope.remove("meta") {
        Some(meta) => serde_json::from_value::<ResponseMeta>(meta).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable meta block: {}", e);
            ResponseMeta::default()
        }),
        None => ResponseMeta::default(),
    };

    Ok(CollectionPayload { items, meta })
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}
