//! `cep-race` server binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use cep_race::config::{load_or_default, validate_config, CepConfig, ConfigError};
use cep_race::lifecycle::{signals, Shutdown};
use cep_race::observability::{logging, metrics};
use cep_race::{net, HttpServer};
use clap::Parser;

#[derive(Parser)]
#[command(name = "cep-race")]
#[command(about = "Resolve Brazilian postal codes by racing ViaCEP and ApiCEP", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(long)]
    bind: Option<String>,

    /// Override race.timeout_ms.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl Cli {
    fn into_config(self) -> Result<CepConfig, ConfigError> {
        let mut config = load_or_default(self.config.as_deref())?;
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.race.timeout_ms = timeout_ms;
        }
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init(&config.observability);

    tracing::info!("cep-race v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        race_timeout_ms = config.race.timeout_ms,
        viacep_url = %config.providers.viacep_url,
        apicep_url = %config.providers.apicep_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validated above.
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(error = %e, "Failed to start metrics endpoint");
        }
    }

    let listener = net::bind(&config.listener).await?;
    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    tokio::spawn(signals::forward_signals(shutdown.clone()));

    server.run(listener, shutdown.signalled()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
