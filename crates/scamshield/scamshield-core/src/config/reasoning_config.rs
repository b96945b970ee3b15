use serde::{Deserialize, Serialize};

use super::defaults;

/// Reasoning dispatcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    /// Primary provider: "gemini", "openai", or "heuristic".
    pub provider: String,
    /// Additional providers tried, in order, before the heuristic.
    pub fallback_providers: Vec<String>,
    /// Deadline shared by the whole provider chain.
    pub timeout_secs: u64,
    pub gemini_model: String,
    pub openai_model: String,
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    /// Endpoint overrides, mainly for proxies and tests.
    pub gemini_endpoint: Option<String>,
    pub openai_endpoint: Option<String>,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_REASONING_PROVIDER.to_string(),
            fallback_providers: Vec::new(),
            timeout_secs: defaults::DEFAULT_REASONING_TIMEOUT_SECS,
            gemini_model: defaults::DEFAULT_GEMINI_MODEL.to_string(),
            openai_model: defaults::DEFAULT_OPENAI_MODEL.to_string(),
            google_api_key: None,
            openai_api_key: None,
            gemini_endpoint: None,
            openai_endpoint: None,
        }
    }
}
