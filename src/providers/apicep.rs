//! ApiCEP client.
//!
//! `GET <base>/file/apicep/<NNNNN-NNN>.json`. Rate limiting is reported as
//! HTTP 429 with a structured error body that is surfaced to the caller.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::providers::fetch::{decode, get, join_segments};
use crate::providers::types::{FetchError, PostalCode, ProviderOutcome};

/// Address in ApiCEP's native shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiCepAddress {
    pub code: String,
    pub state: String,
    pub city: String,
    pub district: String,
    pub address: String,
}

/// Error body sent alongside HTTP 429.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiCepError {
    pub status: u16,
    pub ok: bool,
    pub message: String,
    #[serde(rename = "statusText")]
    pub status_text: String,
}

#[derive(Debug, Clone)]
pub struct ApiCepClient {
    http: Client,
    base_url: Url,
}

impl ApiCepClient {
    pub fn new(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn endpoint(&self, cep: &PostalCode) -> Result<Url, FetchError> {
        let file = format!("{}.json", cep.hyphenated());
        join_segments(&self.base_url, &["file", "apicep", &file])
    }

    /// Look up a postal code. Never fails: a 429 keeps the provider's status
    /// and message; everything else that goes wrong is a 500.
    pub async fn lookup(&self, cep: &PostalCode) -> ProviderOutcome<ApiCepAddress> {
        self.fetch(cep).await.unwrap_or_else(|e| {
            tracing::debug!(cep = %cep, error = %e, "ApiCEP call failed");
            ProviderOutcome::UpstreamError {
                status: 500,
                message: e.to_string(),
            }
        })
    }

    async fn fetch(&self, cep: &PostalCode) -> Result<ProviderOutcome<ApiCepAddress>, FetchError> {
        let url = self.endpoint(cep)?;
        let (status, body) = get(&self.http, url).await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Ok(rate_limited(&body));
        }

        let address: ApiCepAddress = decode(&body)?;
        if address.code.is_empty() {
            Ok(ProviderOutcome::NotFound)
        } else {
            Ok(ProviderOutcome::Success(address))
        }
    }
}

fn rate_limited(body: &[u8]) -> ProviderOutcome<ApiCepAddress> {
    match decode::<ApiCepError>(body) {
        Ok(err) => {
            tracing::warn!(
                status = err.status,
                status_text = %err.status_text,
                "ApiCEP rate limited"
            );
            ProviderOutcome::UpstreamError {
                status: err.status,
                message: err.message,
            }
        }
        Err(e) => ProviderOutcome::UpstreamError {
            status: StatusCode::TOO_MANY_REQUESTS.as_u16(),
            message: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_hyphenates() {
        let client = ApiCepClient::new(Client::new(), Url::parse("https://cdn.apicep.com").unwrap());
        let url = client.endpoint(&PostalCode::parse("01001000").unwrap()).unwrap();
        assert_eq!(url.as_str(), "https://cdn.apicep.com/file/apicep/01001-000.json");
    }

    #[test]
    fn test_rate_limited_with_body() {
        let outcome = rate_limited(
            br#"{"status":429,"ok":false,"message":"rate limited","statusText":"Too Many Requests"}"#,
        );
        assert_eq!(
            outcome,
            ProviderOutcome::UpstreamError {
                status: 429,
                message: "rate limited".into()
            }
        );
    }

    #[test]
    fn test_rate_limited_with_garbage_body() {
        match rate_limited(b"slow down") {
            ProviderOutcome::UpstreamError { status, message } => {
                assert_eq!(status, 429);
                assert!(!message.is_empty());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_rate_limited_body_missing_fields() {
        assert!(matches!(
            rate_limited(br#"{"message":"rate limited"}"#),
            ProviderOutcome::UpstreamError { status: 429, .. }
        ));
    }
}
