//! First-to-finish race between the two providers.
//!
//! # Responsibilities
//! - Spawn one task per provider
//! - Wait for the first provider outcome or the deadline, whichever comes first
//! - Leave the losing call running; its result is dropped when it finishes
//!
//! # Design Decisions
//! - No priority between providers; simultaneous completions are decided by
//!   `tokio::select!`'s random branch order
//! - The first outcome wins even when it is an error and the other provider
//!   would have succeeded
//! - Losers are detached, never aborted. Their lifetime is bounded by the
//!   HTTP client's per-call timeout

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::task::JoinError;

use crate::observability::metrics;
use crate::providers::{
    AddressPayload, ApiCepAddress, PostalCode, Provider, ProviderOutcome, Providers,
    ViaCepAddress,
};
use crate::race::verdict::RaceResult;

/// Races both providers for every postal code it is asked to resolve.
#[derive(Debug, Clone)]
pub struct RaceCoordinator {
    providers: Providers,
    timeout: Duration,
}

impl RaceCoordinator {
    pub fn new(providers: Providers, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve a postal code against both providers.
    pub async fn resolve(&self, cep: &PostalCode) -> RaceResult {
        let start = Instant::now();

        let viacep = {
            let client = self.providers.viacep.clone();
            let cep = cep.clone();
            observed(Provider::ViaCep, async move { client.lookup(&cep).await })
        };
        let apicep = {
            let client = self.providers.apicep.clone();
            let cep = cep.clone();
            observed(Provider::ApiCep, async move { client.lookup(&cep).await })
        };

        let result = race(viacep, apicep, self.timeout).await;

        tracing::debug!(
            cep = %cep,
            outcome = result.label(),
            provider = result.provider().map(|p| p.name()).unwrap_or("none"),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Race finished"
        );
        metrics::record_lookup(&result, start);

        result
    }
}

/// Run both provider calls as independent tasks and return the verdict of
/// whichever finishes first, or [`RaceResult::TimedOut`] once `deadline`
/// passes.
pub async fn race<A, B>(viacep: A, apicep: B, deadline: Duration) -> RaceResult
where
    A: Future<Output = ProviderOutcome<ViaCepAddress>> + Send + 'static,
    B: Future<Output = ProviderOutcome<ApiCepAddress>> + Send + 'static,
{
    let viacep_task = tokio::spawn(viacep);
    let apicep_task = tokio::spawn(apicep);

    // Dropping a JoinHandle detaches its task, so the losing call keeps
    // running after we return.
    tokio::select! {
        joined = viacep_task => RaceResult::from_outcome(
            Provider::ViaCep,
            settle(Provider::ViaCep, joined).map(AddressPayload::ViaCep),
        ),
        joined = apicep_task => RaceResult::from_outcome(
            Provider::ApiCep,
            settle(Provider::ApiCep, joined).map(AddressPayload::ApiCep),
        ),
        _ = tokio::time::sleep(deadline) => RaceResult::TimedOut,
    }
}

/// A provider task that panicked still counts as that provider's answer.
fn settle<T>(provider: Provider, joined: Result<ProviderOutcome<T>, JoinError>) -> ProviderOutcome<T> {
    joined.unwrap_or_else(|e| {
        tracing::error!(provider = %provider, error = %e, "Provider task failed");
        ProviderOutcome::UpstreamError {
            status: 500,
            message: format!("provider task failed: {e}"),
        }
    })
}

/// Record per-provider latency and outcome, including for calls that lose.
async fn observed<T, F>(provider: Provider, call: F) -> ProviderOutcome<T>
where
    F: Future<Output = ProviderOutcome<T>>,
{
    let start = Instant::now();
    let outcome = call.await;
    tracing::trace!(
        provider = %provider,
        outcome = outcome.label(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Provider call finished"
    );
    metrics::record_provider_call(provider, outcome.label(), start);
    outcome
}
