//! Upstream address-lookup providers.
//!
//! # Data Flow
//! ```text
//! PostalCode
//!     → viacep.rs  (GET /ws/<cep>/json/)            ─┐
//!     → apicep.rs  (GET /file/apicep/<NNNNN-NNN>.json) ─┤→ ProviderOutcome<T>
//!                   fetch.rs (GET, read body, decode) ─┘
//! ```
//!
//! # Design Decisions
//! - Clients never return `Err`; transport, decode and empty payloads are
//!   all outcome values
//! - Each provider keeps its native response shape; nothing is translated
//! - One pooled `reqwest::Client` shared by both, with a per-call timeout
//! - Exactly one outbound call per lookup, no retries

pub mod apicep;
pub mod fetch;
pub mod types;
pub mod viacep;

use url::Url;

use crate::config::ProvidersConfig;

pub use apicep::{ApiCepAddress, ApiCepClient, ApiCepError};
pub use types::{AddressPayload, FetchError, PostalCode, Provider, ProviderOutcome, ProviderSetupError};
pub use viacep::{ViaCepAddress, ViaCepClient};

/// Both provider clients, built once at startup and cloned into each race.
#[derive(Debug, Clone)]
pub struct Providers {
    pub viacep: ViaCepClient,
    pub apicep: ApiCepClient,
}

impl Providers {
    pub fn from_config(config: &ProvidersConfig) -> Result<Self, ProviderSetupError> {
        let http = fetch::build_http_client(config)?;
        let viacep_url = parse_base(Provider::ViaCep, &config.viacep_url)?;
        let apicep_url = parse_base(Provider::ApiCep, &config.apicep_url)?;

        Ok(Self {
            viacep: ViaCepClient::new(http.clone(), viacep_url),
            apicep: ApiCepClient::new(http, apicep_url),
        })
    }
}

fn parse_base(provider: Provider, url: &str) -> Result<Url, ProviderSetupError> {
    Url::parse(url).map_err(|source| ProviderSetupError::BaseUrl {
        provider,
        url: url.to_string(),
        source,
    })
}
