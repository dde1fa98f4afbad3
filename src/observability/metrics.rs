//! Metrics collection and exposition.
//!
//! # Metrics
//! - `cep_lookups_total` (counter): races by outcome and deciding provider
//! - `cep_lookup_duration_seconds` (histogram): race latency by outcome
//! - `cep_provider_calls_total` (counter): every provider call, winners and losers
//! - `cep_provider_call_duration_seconds` (histogram): provider latency
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::providers::Provider;
use crate::race::RaceResult;

/// Install the Prometheus recorder and its HTTP scrape endpoint.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_lookup(result: &RaceResult, start: Instant) {
    let outcome = result.label();
    let provider = result.provider().map(|p| p.name()).unwrap_or("none");

    ::metrics::counter!("cep_lookups_total", "outcome" => outcome, "provider" => provider)
        .increment(1);
    ::metrics::histogram!("cep_lookup_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_provider_call(provider: Provider, outcome: &'static str, start: Instant) {
    ::metrics::counter!(
        "cep_provider_calls_total",
        "provider" => provider.name(),
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!("cep_provider_call_duration_seconds", "provider" => provider.name())
        .record(start.elapsed().as_secs_f64());
}
