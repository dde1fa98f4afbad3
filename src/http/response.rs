//! Mapping race verdicts to HTTP responses.
//!
//! | Verdict        | Status                         | Body               |
//! |----------------|--------------------------------|--------------------|
//! | Resolved       | 200                            | provider JSON      |
//! | NotFound       | 404                            | empty              |
//! | UpstreamError  | provider's status (502 if odd) | plain-text message |
//! | TimedOut       | 408                            | empty              |

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::race::RaceResult;

/// Names the provider whose answer was used.
pub const X_CEP_PROVIDER: HeaderName = HeaderName::from_static("x-cep-provider");

impl IntoResponse for RaceResult {
    fn into_response(self) -> Response {
        let provider = self.provider();

        let mut response = match self {
            RaceResult::Resolved(payload) => (StatusCode::OK, Json(payload)).into_response(),
            RaceResult::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            RaceResult::UpstreamError {
                status, message, ..
            } => (upstream_status(status), message).into_response(),
            RaceResult::TimedOut => StatusCode::REQUEST_TIMEOUT.into_response(),
        };

        if let Some(provider) = provider {
            response
                .headers_mut()
                .insert(X_CEP_PROVIDER, HeaderValue::from_static(provider.name()));
        }
        response
    }
}

/// Pass the provider's status through when it is an error status.
pub fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}
