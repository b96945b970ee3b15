/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("{tier} tier search failed: {reason}")]
    TierFailed { tier: String, reason: String },

    #[error("{tier} tier search timed out after {timeout_secs}s")]
    TierTimeout { tier: String, timeout_secs: u64 },
}
