//! Span definitions per pipeline stage: analysis, extraction, embedding, retrieval, reasoning.

/// Create the top-level span for one analysis request.
#[macro_export]
macro_rules! analysis_span {
    ($request_id:expr, $uploads:expr) => {
        tracing::info_span!("scamshield.analysis", request_id = %$request_id, uploads = $uploads)
    };
}

/// Create an extraction span for one evidence item.
#[macro_export]
macro_rules! extraction_span {
    ($source:expr, $modality:expr) => {
        tracing::info_span!("scamshield.extraction", source = %$source, modality = %$modality)
    };
}

/// Create an embedding span.
#[macro_export]
macro_rules! embedding_span {
    ($encoder:expr, $dimension:expr) => {
        tracing::info_span!("scamshield.embedding", encoder = %$encoder, dimension = $dimension)
    };
}

/// Create a retrieval span for one tier.
#[macro_export]
macro_rules! retrieval_span {
    ($tier:expr, $collection:expr) => {
        tracing::info_span!("scamshield.retrieval", tier = %$tier, collection = %$collection)
    };
}

/// Create a reasoning span.
#[macro_export]
macro_rules! reasoning_span {
    ($provider:expr) => {
        tracing::info_span!("scamshield.reasoning", provider = %$provider)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const ANALYSIS: &str = "scamshield.analysis";
    pub const EXTRACTION: &str = "scamshield.extraction";
    pub const EMBEDDING: &str = "scamshield.embedding";
    pub const RETRIEVAL: &str = "scamshield.retrieval";
    pub const REASONING: &str = "scamshield.reasoning";
}
