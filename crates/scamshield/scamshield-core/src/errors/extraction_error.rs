/// Per-item evidence extraction errors (OCR / transcription).
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unsupported evidence type for {source_name}: {detail}")]
    UnsupportedType { source_name: String, detail: String },

    #[error("extraction failed for {source_name}: {reason}")]
    Failed { source_name: String, reason: String },

    #[error("extraction timed out for {source_name} after {timeout_secs}s")]
    Timeout { source_name: String, timeout_secs: u64 },

    #[error("extractor not configured: {reason}")]
    NotConfigured { reason: String },
}
