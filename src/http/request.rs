//! Request identification and query parsing.
//!
//! # Responsibilities
//! - Generate a UUID v4 request ID when the client did not send one
//! - Read the request ID back for logging
//! - Extract the `cep` query parameter

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::providers::PostalCode;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates `x-request-id` values for [`tower_http::request_id::SetRequestIdLayer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeUuidRequestId;

impl MakeRequestId for MakeUuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// The request ID set by the request-id layer, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// First `cep` value of a raw query string, if present and non-empty.
pub fn cep_param(query: &str) -> Option<PostalCode> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "cep")
        .and_then(|(_, value)| PostalCode::parse(&value))
}
