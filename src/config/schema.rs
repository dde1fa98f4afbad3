//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the CEP lookup service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CepConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream lookup providers.
    pub providers: ProvidersConfig,

    /// Race deadline.
    pub race: RaceConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// ViaCEP base URL; requests go to `<base>/ws/<cep>/json/`.
    pub viacep_url: String,

    /// ApiCEP base URL; requests go to `<base>/file/apicep/<NNNNN-NNN>.json`.
    pub apicep_url: String,

    /// Transport timeout for a single upstream call in seconds.
    ///
    /// Bounds how long an abandoned call may keep its connection.
    pub request_timeout_secs: u64,

    /// User-Agent sent upstream.
    pub user_agent: String,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            viacep_url: "https://viacep.com.br".to_string(),
            apicep_url: "https://cdn.apicep.com".to_string(),
            request_timeout_secs: 10,
            user_agent: concat!("cep-race/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
        }
    }
}

/// Race configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RaceConfig {
    /// How long to wait for the first provider before answering 408.
    pub timeout_ms: u64,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self { timeout_ms: 1000 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Pretty output for development, JSON for log aggregation.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CepConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.race.timeout_ms, 1000);
        assert_eq!(config.providers.viacep_url, "https://viacep.com.br");
        assert_eq!(config.providers.apicep_url, "https://cdn.apicep.com");
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CepConfig = toml::from_str(
            r#"
            [race]
            timeout_ms = 250

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.race.timeout_ms, 250);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
