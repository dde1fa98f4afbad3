//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. Every problem is reported,
//! not just the first one.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::CepConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid base URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field}: must be greater than zero")]
    Zero { field: &'static str },
}

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &CepConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(
        &mut errors,
        "listener.bind_address",
        &config.listener.bind_address,
    );
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    check_base_url(&mut errors, "providers.viacep_url", &config.providers.viacep_url);
    check_base_url(&mut errors, "providers.apicep_url", &config.providers.apicep_url);

    if config.providers.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "providers.request_timeout_secs",
        });
    }
    if config.race.timeout_ms == 0 {
        errors.push(ValidationError::Zero {
            field: "race.timeout_ms",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_base_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    let reason = match Url::parse(value) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            Some(format!("unsupported scheme '{}'", url.scheme()))
        }
        Ok(url) if url.cannot_be_a_base() => Some("cannot be a base".to_string()),
        Ok(_) => None,
        Err(e) => Some(e.to_string()),
    };

    if let Some(reason) = reason {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason,
        });
    }
}
