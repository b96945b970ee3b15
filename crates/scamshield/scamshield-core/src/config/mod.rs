pub mod defaults;
pub mod embedding_config;
pub mod extraction_config;
pub mod memory_config;
pub mod observability_config;
pub mod reasoning_config;
pub mod retrieval_config;
pub mod store_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ShieldError, ShieldResult};

pub use embedding_config::EmbeddingConfig;
pub use extraction_config::ExtractionConfig;
pub use memory_config::MemoryConfig;
pub use observability_config::ObservabilityConfig;
pub use reasoning_config::ReasoningConfig;
pub use retrieval_config::RetrievalConfig;
pub use store_config::StoreConfig;

/// Environment variables read by [`ShieldConfig::apply_env`].
pub mod env_keys {
    pub const USE_CLOUD: &str = "USE_CLOUD";
    pub const QDRANT_URL: &str = "QDRANT_CLOUD_URL";
    pub const QDRANT_API_KEY: &str = "QDRANT_API_KEY";
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
    pub const REASONING_PROVIDER: &str = "SCAMSHIELD_REASONING_PROVIDER";
}

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShieldConfig {
    pub store: StoreConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub reasoning: ReasoningConfig,
    pub extraction: ExtractionConfig,
    pub memory: MemoryConfig,
    pub observability: ObservabilityConfig,
}

impl ShieldConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load config from an optional TOML file, overlay the process environment,
    /// and validate the result.
    pub fn load(path: Option<&Path>) -> ShieldResult<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    ShieldError::ConfigError(format!("cannot read {}: {e}", path.display()))
                })?;
                Self::from_toml(&raw).map_err(|e| {
                    ShieldError::ConfigError(format!("invalid TOML in {}: {e}", path.display()))
                })?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from environment-style lookups. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(env_keys::USE_CLOUD) {
            self.store.use_cloud = v.trim().eq_ignore_ascii_case("true");
        }
        if let Some(v) = get(env_keys::QDRANT_URL) {
            self.store.url = Some(v);
        }
        if let Some(v) = get(env_keys::QDRANT_API_KEY) {
            self.store.api_key = Some(v);
        }
        if let Some(v) = get(env_keys::OPENAI_API_KEY) {
            self.reasoning.openai_api_key = Some(v.clone());
            if self.embedding.api_key.is_none() {
                self.embedding.api_key = Some(v);
            }
        }
        if let Some(v) = get(env_keys::GOOGLE_API_KEY) {
            self.reasoning.google_api_key = Some(v);
        }
        if let Some(v) = get(env_keys::REASONING_PROVIDER) {
            self.reasoning.provider = v.trim().to_ascii_lowercase();
        }
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> ShieldResult<()> {
        if self.store.use_cloud && (self.store.url.is_none() || self.store.api_key.is_none()) {
            return Err(ShieldError::ConfigError(format!(
                "{} and {} must be set when cloud mode is enabled",
                env_keys::QDRANT_URL,
                env_keys::QDRANT_API_KEY
            )));
        }
        if self.store.dimensions == 0 {
            return Err(ShieldError::ConfigError(
                "store.dimensions must be greater than zero".to_string(),
            ));
        }
        if self.embedding.text_dimensions > self.store.dimensions {
            return Err(ShieldError::ConfigError(format!(
                "text encoder produces {} dims but collections declare {}; vectors are padded, never truncated",
                self.embedding.text_dimensions, self.store.dimensions
            )));
        }
        if self.retrieval.case_top_k == 0 || self.retrieval.memory_top_k == 0 {
            return Err(ShieldError::ConfigError(
                "retrieval top-k values must be greater than zero".to_string(),
            ));
        }
        if !(-1.0..=1.0).contains(&self.retrieval.memory_threshold) {
            return Err(ShieldError::ConfigError(format!(
                "retrieval.memory_threshold {} is outside the cosine range [-1, 1]",
                self.retrieval.memory_threshold
            )));
        }
        if self.reasoning.timeout_secs == 0 {
            return Err(ShieldError::ConfigError(
                "reasoning.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
