use serde::{Deserialize, Serialize};

use super::defaults;

/// Knowledge store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Talk to a remote Qdrant instance instead of the local snapshot store.
    pub use_cloud: bool,
    /// Qdrant base URL (cloud mode).
    pub url: Option<String>,
    /// Qdrant API key (cloud mode).
    pub api_key: Option<String>,
    /// Snapshot file for the local store.
    pub local_path: String,
    /// Public case corpus collection.
    pub case_collection: String,
    /// Private memory collection.
    pub memory_collection: String,
    /// Declared dimensionality of both collections.
    pub dimensions: usize,
    /// Per-request timeout for store calls.
    pub timeout_secs: u64,
    /// Points per upsert batch during ingestion.
    pub ingest_batch_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            use_cloud: defaults::DEFAULT_USE_CLOUD,
            url: None,
            api_key: None,
            local_path: defaults::DEFAULT_LOCAL_PATH.to_string(),
            case_collection: defaults::DEFAULT_CASE_COLLECTION.to_string(),
            memory_collection: defaults::DEFAULT_MEMORY_COLLECTION.to_string(),
            dimensions: defaults::DEFAULT_COLLECTION_DIMENSIONS,
            timeout_secs: defaults::DEFAULT_STORE_TIMEOUT_SECS,
            ingest_batch_size: defaults::DEFAULT_INGEST_BATCH_SIZE,
        }
    }
}
