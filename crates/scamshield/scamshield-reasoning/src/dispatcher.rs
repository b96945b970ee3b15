//! VerdictDispatcher: provider chain, shared deadline, heuristic fallback.

use std::sync::Arc;
use std::time::Duration;

use scamshield_core::config::ReasoningConfig;
use scamshield_core::errors::{ReasoningError, ShieldError, ShieldResult};
use scamshield_core::models::{DegradationEvent, Verdict};
use scamshield_core::traits::{IReasoningProvider, ReasoningRequest};
use scamshield_observability::reasoning_span;
use scamshield_observability::tracing_setup::events;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, Instrument};

use crate::parse;
use crate::providers::heuristic::HEURISTIC_PROVIDER;
use crate::providers::{self, HeuristicReasoner};

/// Which path produced the verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerdictSource {
    Provider(String),
    Heuristic,
}

impl VerdictSource {
    pub fn name(&self) -> &str {
        match self {
            Self::Provider(name) => name,
            Self::Heuristic => HEURISTIC_PROVIDER,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub verdict: Verdict,
    pub source: VerdictSource,
    /// One event per provider that failed before the verdict was produced.
    pub degradations: Vec<DegradationEvent>,
}

pub struct VerdictDispatcher {
    chain: Vec<Arc<dyn IReasoningProvider>>,
    timeout: Duration,
}

impl VerdictDispatcher {
    pub fn new(chain: Vec<Arc<dyn IReasoningProvider>>, timeout: Duration) -> Self {
        Self { chain, timeout }
    }

    pub fn from_config(config: &ReasoningConfig) -> Self {
        let chain = providers::build_chain(config);
        info!(
            providers = ?chain.iter().map(|p| p.name().to_string()).collect::<Vec<_>>(),
            timeout_secs = config.timeout_secs,
            "verdict dispatcher initialized"
        );
        Self::new(chain, Duration::from_secs(config.timeout_secs))
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.chain.iter().map(|p| p.name()).collect()
    }

    /// Produce exactly one verdict, unless `cancel` fires first.
    ///
    /// # Errors
    /// Only `Cancelled`. Every provider failure is absorbed by the fallback.
    pub async fn dispatch(
        &self,
        request: ReasoningRequest<'_>,
        cancel: &CancellationToken,
    ) -> ShieldResult<DispatchOutcome> {
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ShieldError::Cancelled),
            outcome = self.run_chain(request) => outcome,
        };
        events::verdict_produced(
            outcome.source.name(),
            outcome.verdict.risk_level.as_str(),
            outcome.verdict.probability,
        );
        Ok(outcome)
    }

    async fn run_chain(&self, request: ReasoningRequest<'_>) -> DispatchOutcome {
        let deadline = Instant::now() + self.timeout;
        let mut degradations = Vec::new();

        for (index, provider) in self.chain.iter().enumerate() {
            let fallback = self
                .chain
                .get(index + 1)
                .map(|p| p.name())
                .unwrap_or(HEURISTIC_PROVIDER);

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                degradations.push(DegradationEvent::now(
                    format!("reasoning.{}", provider.name()),
                    "deadline exhausted before call",
                    HEURISTIC_PROVIDER,
                ));
                break;
            }

            let call = provider
                .assess(request)
                .instrument(reasoning_span!(provider.name()));
            let failure = match tokio::time::timeout(remaining, call).await {
                Ok(Ok(verdict)) => match parse::validate(&verdict) {
                    Ok(()) => {
                        return DispatchOutcome {
                            verdict,
                            source: VerdictSource::Provider(provider.name().to_string()),
                            degradations,
                        }
                    }
                    Err(e) => ShieldError::from(e).to_string(),
                },
                Ok(Err(e)) => e.to_string(),
                Err(_) => ReasoningError::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                }
                .to_string(),
            };

            let event = DegradationEvent::now(
                format!("reasoning.{}", provider.name()),
                failure,
                fallback,
            );
            debug!(provider = provider.name(), failure = %event.failure, fallback, "reasoning provider failed");
            degradations.push(event);
        }

        DispatchOutcome {
            verdict: HeuristicReasoner::verdict(request.cases),
            source: VerdictSource::Heuristic,
            degradations,
        }
    }
}
