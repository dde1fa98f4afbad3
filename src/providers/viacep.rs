//! ViaCEP client.
//!
//! `GET <base>/ws/<cep>/json/`. Unknown codes come back as HTTP 200 with
//! `{"erro": true}`, which decodes to an address with an empty `cep`.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::providers::fetch::{decode, get, join_segments};
use crate::providers::types::{FetchError, PostalCode, ProviderOutcome};

/// Address in ViaCEP's native shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViaCepAddress {
    pub cep: String,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
}

#[derive(Debug, Clone)]
pub struct ViaCepClient {
    http: Client,
    base_url: Url,
}

impl ViaCepClient {
    pub fn new(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn endpoint(&self, cep: &PostalCode) -> Result<Url, FetchError> {
        join_segments(&self.base_url, &["ws", cep.as_str(), "json", ""])
    }

    /// Look up a postal code. Never fails: transport and decode problems
    /// become a 500 [`ProviderOutcome::UpstreamError`].
    pub async fn lookup(&self, cep: &PostalCode) -> ProviderOutcome<ViaCepAddress> {
        match self.fetch(cep).await {
            Ok(address) if address.cep.is_empty() => ProviderOutcome::NotFound,
            Ok(address) => ProviderOutcome::Success(address),
            Err(e) => {
                tracing::debug!(cep = %cep, error = %e, "ViaCEP call failed");
                ProviderOutcome::UpstreamError {
                    status: 500,
                    message: e.to_string(),
                }
            }
        }
    }

    async fn fetch(&self, cep: &PostalCode) -> Result<ViaCepAddress, FetchError> {
        let url = self.endpoint(cep)?;
        let (_, body) = get(&self.http, url).await?;
        decode(&body)
    }
}
