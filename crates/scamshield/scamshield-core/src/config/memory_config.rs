use serde::{Deserialize, Serialize};

use super::defaults;

/// Memory writer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Persist each analysed submission to the private memory collection.
    pub enabled: bool,
    /// Characters of the fused document kept as `original_input`.
    pub excerpt_chars: usize,
    /// Timeout for a single persist call.
    pub persist_timeout_secs: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_MEMORY_ENABLED,
            excerpt_chars: defaults::DEFAULT_EXCERPT_CHARS,
            persist_timeout_secs: defaults::DEFAULT_PERSIST_TIMEOUT_SECS,
        }
    }
}
