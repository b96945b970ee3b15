use async_trait::async_trait;

use crate::errors::ShieldResult;
use crate::models::{CaseMatch, Verdict};

/// Input shared by every reasoning provider.
#[derive(Debug, Clone, Copy)]
pub struct ReasoningRequest<'a> {
    /// Full fused evidence document (not the truncated query).
    pub evidence: &'a str,
    pub cases: &'a [CaseMatch],
    /// Digest of gated memory matches; empty when nothing was recalled.
    pub memory_context: &'a str,
}

/// A reasoning backend that turns fused evidence into a verdict.
#[async_trait]
pub trait IReasoningProvider: Send + Sync {
    /// Produce a validated verdict, or an error the dispatcher will recover from.
    async fn assess(&self, request: ReasoningRequest<'_>) -> ShieldResult<Verdict>;

    fn name(&self) -> &str;
}
