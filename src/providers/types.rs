//! Provider-neutral types: the postal code, provider identity and call outcomes.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::providers::apicep::ApiCepAddress;
use crate::providers::viacep::ViaCepAddress;

/// A caller-supplied postal code.
///
/// Only non-emptiness is checked. Anything else is forwarded upstream as-is
/// and left for the providers to reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Wrap a raw token, rejecting the empty string.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `NNNNN-NNN` form: a hyphen after the fifth character.
    ///
    /// Codes of five characters or fewer are returned unchanged.
    pub fn hyphenated(&self) -> String {
        match self.0.char_indices().nth(5) {
            Some((idx, _)) => format!("{}-{}", &self.0[..idx], &self.0[idx..]),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Upstream lookup provider identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    ViaCep,
    ApiCep,
}

impl Provider {
    /// Stable lowercase name used in logs, metrics and response headers.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::ViaCep => "viacep",
            Provider::ApiCep => "apicep",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a single provider call. Provider clients never return errors;
/// every failure path ends up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome<T> {
    Success(T),
    /// The provider answered but has no such postal code.
    NotFound,
    UpstreamError { status: u16, message: String },
}

impl<T> ProviderOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ProviderOutcome<U> {
        match self {
            ProviderOutcome::Success(value) => ProviderOutcome::Success(f(value)),
            ProviderOutcome::NotFound => ProviderOutcome::NotFound,
            ProviderOutcome::UpstreamError { status, message } => {
                ProviderOutcome::UpstreamError { status, message }
            }
        }
    }

    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderOutcome::Success(_) => "success",
            ProviderOutcome::NotFound => "not_found",
            ProviderOutcome::UpstreamError { .. } => "upstream_error",
        }
    }
}

/// A resolved address in the native shape of whichever provider answered.
///
/// Serializes without a wrapper, so clients see the provider's own field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AddressPayload {
    ViaCep(ViaCepAddress),
    ApiCep(ApiCepAddress),
}

impl AddressPayload {
    pub fn provider(&self) -> Provider {
        match self {
            AddressPayload::ViaCep(_) => Provider::ViaCep,
            AddressPayload::ApiCep(_) => Provider::ApiCep,
        }
    }
}

/// Failure while talking to an upstream. Internal to the provider clients;
/// converted into [`ProviderOutcome::UpstreamError`] at the client boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error("base URL cannot carry path segments: {0}")]
    BaseUrl(String),
}

/// Failure while constructing the provider clients at startup.
#[derive(Debug, Error)]
pub enum ProviderSetupError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid {provider} base URL '{url}': {source}")]
    BaseUrl {
        provider: Provider,
        url: String,
        source: url::ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postal_code_rejects_empty() {
        assert!(PostalCode::parse("").is_none());
        assert_eq!(PostalCode::parse("01001000").unwrap().as_str(), "01001000");
    }

    #[test]
    fn test_hyphenated() {
        let cep = PostalCode::parse("01001000").unwrap();
        assert_eq!(cep.hyphenated(), "01001-000");
    }

    #[test]
    fn test_hyphenated_passes_garbage_through() {
        assert_eq!(PostalCode::parse("123").unwrap().hyphenated(), "123");
        assert_eq!(PostalCode::parse("12345").unwrap().hyphenated(), "12345");
        assert_eq!(PostalCode::parse("abcdefghij").unwrap().hyphenated(), "abcde-fghij");
        // Multi-byte characters split on a char boundary.
        assert_eq!(PostalCode::parse("ããããããã").unwrap().hyphenated(), "ããããã-ãã");
    }

    #[test]
    fn test_outcome_map_keeps_errors() {
        let outcome: ProviderOutcome<u8> = ProviderOutcome::UpstreamError {
            status: 429,
            message: "slow down".into(),
        };
        assert_eq!(
            outcome.map(u32::from),
            ProviderOutcome::UpstreamError {
                status: 429,
                message: "slow down".into()
            }
        );
        assert_eq!(ProviderOutcome::Success(1u8).map(|v| v + 1), ProviderOutcome::Success(2));
    }

    #[test]
    fn test_payload_serializes_native_shape() {
        let payload = AddressPayload::ApiCep(ApiCepAddress {
            code: "01001-000".into(),
            state: "SP".into(),
            city: "São Paulo".into(),
            district: "Sé".into(),
            address: "Praça da Sé".into(),
        });
        assert_eq!(payload.provider(), Provider::ApiCep);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["code"], "01001-000");
        assert!(json.get("ApiCep").is_none());
    }
}
