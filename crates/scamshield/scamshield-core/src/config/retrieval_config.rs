use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval coordinator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Public case corpus matches to return (no score gate).
    pub case_top_k: usize,
    /// Private memory candidates to fetch before gating.
    pub memory_top_k: usize,
    /// Confidence gate for the private tier (inclusive).
    pub memory_threshold: f32,
    /// Per-tier search timeout.
    pub search_timeout_secs: u64,
    /// Minimum top-1 score for a scam-labelled image match to count as high risk.
    pub visual_scam_threshold: f32,
    /// Characters of the fused document used as the search query.
    pub query_char_cap: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            case_top_k: defaults::DEFAULT_CASE_TOP_K,
            memory_top_k: defaults::DEFAULT_MEMORY_TOP_K,
            memory_threshold: defaults::DEFAULT_MEMORY_THRESHOLD,
            search_timeout_secs: defaults::DEFAULT_SEARCH_TIMEOUT_SECS,
            visual_scam_threshold: defaults::DEFAULT_VISUAL_SCAM_THRESHOLD,
            query_char_cap: defaults::DEFAULT_QUERY_CHAR_CAP,
        }
    }
}
