//! Shared upstream plumbing: client construction, URL building, GET + decode.

use std::time::Duration;

use axum::body::Bytes;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ProvidersConfig;
use crate::providers::types::FetchError;

/// Build the pooled HTTP client shared by both providers.
///
/// The per-call timeout is what eventually frees an abandoned call.
pub fn build_http_client(config: &ProvidersConfig) -> Result<Client, reqwest::Error> {
    let builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_secs));

    if config.use_system_proxy {
        builder.build()
    } else {
        builder.no_proxy().build()
    }
}

/// Append percent-encoded path segments to a base URL.
pub fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, FetchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FetchError::BaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Perform one GET and read the whole body.
pub async fn get(client: &Client, url: Url) -> Result<(StatusCode, Bytes), FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    let body = response.bytes().await?;
    Ok((status, body))
}

pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, FetchError> {
    Ok(serde_json::from_slice(body)?)
}
