use serde::{Deserialize, Serialize};

use super::defaults;

/// Evidence extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Per-item OCR / transcription timeout.
    pub timeout_secs: u64,
    /// Vision/transcription model.
    pub model: String,
    /// Endpoint override for the extractor backend.
    pub endpoint: Option<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::DEFAULT_EXTRACTION_TIMEOUT_SECS,
            model: defaults::DEFAULT_GEMINI_MODEL.to_string(),
            endpoint: None,
        }
    }
}
