/// Embedding gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("encoder timed out after {seconds}s")]
    TimedOut { seconds: u64 },

    #[error("{provider} cannot encode {modality} content")]
    UnsupportedModality { provider: String, modality: String },
}
