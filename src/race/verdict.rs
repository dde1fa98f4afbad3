//! The race verdict.

use crate::providers::{AddressPayload, Provider, ProviderOutcome};

/// Final answer of one race. Exactly one provider's outcome, or the timer,
/// decides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceResult {
    Resolved(AddressPayload),
    NotFound(Provider),
    UpstreamError {
        provider: Provider,
        status: u16,
        message: String,
    },
    TimedOut,
}

impl RaceResult {
    /// Translate the winning provider's outcome one-to-one.
    pub fn from_outcome(provider: Provider, outcome: ProviderOutcome<AddressPayload>) -> Self {
        match outcome {
            ProviderOutcome::Success(payload) => RaceResult::Resolved(payload),
            ProviderOutcome::NotFound => RaceResult::NotFound(provider),
            ProviderOutcome::UpstreamError { status, message } => RaceResult::UpstreamError {
                provider,
                status,
                message,
            },
        }
    }

    /// The provider that decided the verdict, if any.
    pub fn provider(&self) -> Option<Provider> {
        match self {
            RaceResult::Resolved(payload) => Some(payload.provider()),
            RaceResult::NotFound(provider) => Some(*provider),
            RaceResult::UpstreamError { provider, .. } => Some(*provider),
            RaceResult::TimedOut => None,
        }
    }

    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            RaceResult::Resolved(_) => "resolved",
            RaceResult::NotFound(_) => "not_found",
            RaceResult::UpstreamError { .. } => "upstream_error",
            RaceResult::TimedOut => "timed_out",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ViaCepAddress;

    #[test]
    fn test_from_outcome() {
        let payload = AddressPayload::ViaCep(ViaCepAddress {
            cep: "01001-000".into(),
            ..Default::default()
        });
        let resolved = RaceResult::from_outcome(
            Provider::ViaCep,
            ProviderOutcome::Success(payload.clone()),
        );
        assert_eq!(resolved, RaceResult::Resolved(payload));
        assert_eq!(resolved.provider(), Some(Provider::ViaCep));

        let not_found = RaceResult::from_outcome(Provider::ApiCep, ProviderOutcome::NotFound);
        assert_eq!(not_found, RaceResult::NotFound(Provider::ApiCep));
        assert_eq!(not_found.label(), "not_found");

        assert_eq!(RaceResult::TimedOut.provider(), None);
    }
}
