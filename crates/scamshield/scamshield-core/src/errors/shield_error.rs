use super::{EmbeddingError, ExtractionError, ReasoningError, RetrievalError, StoreError};

/// Top-level error type for the ScamShield engine.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum ShieldError {
    #[error("no evidence could be extracted from {submitted} submitted item(s)")]
    EmptyEvidence { submitted: usize },

    #[error("embedding failed: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("extraction failed: {0}")]
    ExtractionError(#[from] ExtractionError),

    #[error("store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("reasoning error: {0}")]
    ReasoningError(#[from] ReasoningError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("request cancelled by caller")]
    Cancelled,
}

/// Which side of the request boundary an error belongs to.
///
/// A transport layer maps `Client` to a 4xx status and `Server` to a 5xx.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Client,
    Server,
}

impl ShieldError {
    /// Classify the error for the request boundary.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::EmptyEvidence { .. } => ErrorClass::Client,
            _ => ErrorClass::Server,
        }
    }
}

/// Convenience type alias.
pub type ShieldResult<T> = Result<T, ShieldError>;
