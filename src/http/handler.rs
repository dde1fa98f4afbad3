//! The lookup endpoint: `GET /?cep=<code>`.

use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::request::{cep_param, request_id};
use crate::http::server::AppState;

/// Validate the query, run the race, and answer with its verdict.
pub async fn lookup(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let request_id = request_id(&headers);

    let Some(cep) = query.as_deref().and_then(cep_param) else {
        tracing::debug!(request_id = %request_id, "Missing cep parameter");
        return StatusCode::BAD_REQUEST.into_response();
    };

    let result = state.coordinator.resolve(&cep).await;

    tracing::info!(
        request_id = %request_id,
        cep = %cep,
        outcome = result.label(),
        provider = result.provider().map(|p| p.name()).unwrap_or("none"),
        "Lookup finished"
    );

    result.into_response()
}

/// Any path other than `/`.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// `HEAD /`. Without this, axum answers HEAD with the GET handler.
pub async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}
