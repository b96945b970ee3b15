//! Text encoder construction.

pub mod api_provider;
pub mod hashed_text;

use std::sync::Arc;

pub use api_provider::ApiEncoder;
pub use hashed_text::HashedTextEncoder;

use scamshield_core::config::EmbeddingConfig;
use scamshield_core::errors::ShieldResult;
use scamshield_core::traits::IEncoder;
use tracing::warn;

/// Build the configured text encoder.
///
/// `"api"` without an API key degrades to the hashed encoder with a warning
/// rather than failing startup.
pub fn create_text_encoder(config: &EmbeddingConfig) -> ShieldResult<Arc<dyn IEncoder>> {
    match config.provider.as_str() {
        "api" => match &config.api_key {
            Some(key) => Ok(Arc::new(ApiEncoder::new(config, key.clone())?)),
            None => {
                warn!("embedding provider 'api' has no API key; using hashed encoder");
                Ok(Arc::new(HashedTextEncoder::new(config.text_dimensions)))
            }
        },
        "hashed" => Ok(Arc::new(HashedTextEncoder::new(config.text_dimensions))),
        other => {
            warn!(provider = other, "unknown embedding provider; using hashed encoder");
            Ok(Arc::new(HashedTextEncoder::new(config.text_dimensions)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_without_key_falls_back_to_hashed() {
        let config = EmbeddingConfig {
            provider: "api".to_string(),
            api_key: None,
            ..Default::default()
        };
        let encoder = create_text_encoder(&config).unwrap();
        assert_eq!(encoder.name(), "hashed-text");
        assert_eq!(encoder.dimensions(), config.text_dimensions);
    }

    #[test]
    fn api_with_key_builds_remote_encoder() {
        let config = EmbeddingConfig {
            provider: "api".to_string(),
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let encoder = create_text_encoder(&config).unwrap();
        assert_eq!(encoder.name(), config.model);
    }

    #[test]
    fn unknown_provider_falls_back_to_hashed() {
        let config = EmbeddingConfig {
            provider: "word2vec".to_string(),
            ..Default::default()
        };
        assert_eq!(create_text_encoder(&config).unwrap().name(), "hashed-text");
    }
}
