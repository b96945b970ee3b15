/// Reasoning backend errors. Every variant is recovered by the heuristic
/// fallback inside the dispatcher; none reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum ReasoningError {
    #[error("provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("provider {provider} returned {status}: {body}")]
    BadStatus {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("invalid verdict output: {reason}")]
    InvalidOutput { reason: String },

    #[error("reasoning timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("provider not configured: {provider}")]
    NotConfigured { provider: String },
}
