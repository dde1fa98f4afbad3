//! One-shot lookup: run a single race from the command line.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use cep_race::config::{load_or_default, validate_config, CepConfig, ConfigError};
use cep_race::observability::logging;
use cep_race::{PostalCode, Providers, RaceCoordinator, RaceResult};
use clap::Parser;

const EXIT_NOT_FOUND: u8 = 2;
const EXIT_UPSTREAM_ERROR: u8 = 3;
const EXIT_TIMED_OUT: u8 = 4;

#[derive(Parser)]
#[command(name = "cep-lookup")]
#[command(about = "Look up one postal code against ViaCEP and ApiCEP", long_about = None)]
struct Cli {
    /// Postal code, e.g. 01001000.
    cep: String,

    /// TOML configuration file (providers, race and observability sections are used).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override race.timeout_ms.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log at debug level to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    apply_overrides(&cli, &mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_stderr(&config.observability);

    let cep = PostalCode::parse(&cli.cep).ok_or("postal code must not be empty")?;
    let coordinator = RaceCoordinator::new(
        Providers::from_config(&config.providers)?,
        Duration::from_millis(config.race.timeout_ms),
    );

    let result = coordinator.resolve(&cep).await;
    let code = report(
        &cep,
        result,
        coordinator.timeout(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;

    Ok(ExitCode::from(code))
}

fn apply_overrides(cli: &Cli, config: &mut CepConfig) {
    if let Some(timeout_ms) = cli.timeout_ms {
        config.race.timeout_ms = timeout_ms;
    }
    // Without a config file, stay quiet unless asked.
    if cli.verbose {
        config.observability.log_level = "debug".to_string();
    } else if cli.config.is_none() {
        config.observability.log_level = "warn".to_string();
    }
}

/// Print the verdict and return the process exit code.
///
/// Only a resolved address goes to `out`, as pretty JSON; everything else is
/// a one-line diagnostic on `err`.
fn report(
    cep: &PostalCode,
    result: RaceResult,
    timeout: Duration,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<u8, Box<dyn std::error::Error>> {
    let code = match result {
        RaceResult::Resolved(payload) => {
            writeln!(err, "answered by {}", payload.provider())?;
            serde_json::to_writer_pretty(&mut *out, &payload)?;
            writeln!(out)?;
            0
        }
        RaceResult::NotFound(provider) => {
            writeln!(err, "{cep}: not found ({provider})")?;
            EXIT_NOT_FOUND
        }
        RaceResult::UpstreamError {
            provider,
            status,
            message,
        } => {
            writeln!(err, "{cep}: {provider} failed with {status}: {message}")?;
            EXIT_UPSTREAM_ERROR
        }
        RaceResult::TimedOut => {
            writeln!(
                err,
                "{cep}: no provider answered within {}ms",
                timeout.as_millis()
            )?;
            EXIT_TIMED_OUT
        }
    };

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cep_race::providers::ApiCepAddress;
    use cep_race::{AddressPayload, Provider};

    fn run(result: RaceResult) -> (u8, String, String) {
        let cep = PostalCode::parse("01001000").unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = report(&cep, result, Duration::from_secs(1), &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn overridden(args: &[&str], config: CepConfig) -> CepConfig {
        let cli = Cli::parse_from(args);
        let mut config = config;
        apply_overrides(&cli, &mut config);
        config
    }

    #[test]
    fn test_log_level_defaults_to_warn_without_config() {
        let config = overridden(&["cep-lookup", "01001000"], CepConfig::default());
        assert_eq!(config.observability.log_level, "warn");
    }

    #[test]
    fn test_config_file_log_level_is_kept() {
        let mut file_config = CepConfig::default();
        file_config.observability.log_level = "trace".to_string();

        let config = overridden(&["cep-lookup", "--config", "cep.toml", "01001000"], file_config);
        assert_eq!(config.observability.log_level, "trace");
    }

    #[test]
    fn test_verbose_wins_over_config_file() {
        let mut file_config = CepConfig::default();
        file_config.observability.log_level = "error".to_string();

        let config = overridden(
            &["cep-lookup", "-v", "--config", "cep.toml", "--timeout-ms", "250", "01001000"],
            file_config,
        );
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.race.timeout_ms, 250);
    }

    #[test]
    fn test_resolved_prints_json_and_exits_zero() {
        let address = ApiCepAddress {
            code: "01001-000".into(),
            state: "SP".into(),
            city: "Sao Paulo".into(),
            district: "Se".into(),
            address: "Praca da Se".into(),
        };
        let (code, out, err) = run(RaceResult::Resolved(AddressPayload::ApiCep(address)));

        assert_eq!(code, 0);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["code"], "01001-000");
        assert_eq!(json["city"], "Sao Paulo");
        assert_eq!(err, "answered by apicep\n");
    }

    #[test]
    fn test_not_found_exits_two() {
        let (code, out, err) = run(RaceResult::NotFound(Provider::ViaCep));
        assert_eq!(code, EXIT_NOT_FOUND);
        assert!(out.is_empty());
        assert_eq!(err, "01001000: not found (viacep)\n");
    }

    #[test]
    fn test_upstream_error_exits_three() {
        let (code, out, err) = run(RaceResult::UpstreamError {
            provider: Provider::ApiCep,
            status: 429,
            message: "rate limited".into(),
        });
        assert_eq!(code, EXIT_UPSTREAM_ERROR);
        assert!(out.is_empty());
        assert_eq!(err, "01001000: apicep failed with 429: rate limited\n");
    }

    #[test]
    fn test_timeout_exits_four() {
        let (code, out, err) = run(RaceResult::TimedOut);
        assert_eq!(code, EXIT_TIMED_OUT);
        assert!(out.is_empty());
        assert_eq!(err, "01001000: no provider answered within 1000ms\n");
    }
}
