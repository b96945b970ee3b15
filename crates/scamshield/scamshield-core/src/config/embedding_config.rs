use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Text encoder: "hashed" (local) or "api" (OpenAI-compatible endpoint).
    pub provider: String,
    /// Remote model name for the "api" provider.
    pub model: String,
    /// Remote endpoint override.
    pub endpoint: Option<String>,
    /// API key for the "api" provider.
    pub api_key: Option<String>,
    /// Output dimensionality of the text encoder.
    pub text_dimensions: usize,
    /// Output dimensionality of the image encoder, when one is wired in.
    pub image_dimensions: usize,
    /// L1 in-memory cache max entries.
    pub l1_cache_size: u64,
    /// Per-call timeout for remote encoders.
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            endpoint: None,
            api_key: None,
            text_dimensions: defaults::DEFAULT_TEXT_DIMENSIONS,
            image_dimensions: defaults::DEFAULT_IMAGE_DIMENSIONS,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
            timeout_secs: defaults::DEFAULT_EMBEDDING_TIMEOUT_SECS,
        }
    }
}
