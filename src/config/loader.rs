//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::CepConfig;
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load `path` when given, otherwise start from defaults.
///
/// The result is not validated; callers apply CLI overrides first and then
/// run [`crate::config::validate_config`].
pub fn load_or_default(path: Option<&Path>) -> Result<CepConfig, ConfigError> {
    match path {
        Some(path) => parse_config(&fs::read_to_string(path)?),
        None => Ok(CepConfig::default()),
    }
}

fn parse_config(content: &str) -> Result<CepConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}
