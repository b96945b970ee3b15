//! EmbeddingGateway: the single entry point for turning evidence into vectors.
//!
//! Text queries go through the L1 cache; image bytes are encoded fresh.
//! Every returned vector is zero-padded to the caller's target dimensionality.

use std::sync::Arc;

use scamshield_core::config::EmbeddingConfig;
use scamshield_core::errors::{EmbeddingError, ShieldResult};
use scamshield_core::traits::IEncoder;
use tracing::{debug, info};

use crate::cache::{content_key, L1MemoryCache};
use crate::padding;
use crate::providers;

pub struct EmbeddingGateway {
    text: Arc<dyn IEncoder>,
    image: Option<Arc<dyn IEncoder>>,
    cache: L1MemoryCache,
}

impl EmbeddingGateway {
    /// Wire explicit encoders. The image encoder is optional; without one,
    /// visual matching is skipped.
    pub fn new(
        text: Arc<dyn IEncoder>,
        image: Option<Arc<dyn IEncoder>>,
        l1_cache_size: u64,
    ) -> Self {
        info!(
            text_encoder = text.name(),
            text_dims = text.dimensions(),
            image_encoder = image.as_ref().map(|e| e.name()).unwrap_or("none"),
            "EmbeddingGateway initialized"
        );
        Self {
            text,
            image,
            cache: L1MemoryCache::new(l1_cache_size),
        }
    }

    /// Build from configuration with no image encoder.
    pub fn from_config(config: &EmbeddingConfig) -> ShieldResult<Self> {
        let text = providers::create_text_encoder(config)?;
        Ok(Self::new(text, None, config.l1_cache_size))
    }

    pub fn with_image_encoder(mut self, image: Arc<dyn IEncoder>) -> Self {
        self.image = Some(image);
        self
    }

    /// Encode a query string and pad it to `target_dims`.
    pub async fn encode_query(&self, text: &str, target_dims: usize) -> ShieldResult<Vec<f32>> {
        let key = content_key(self.text.name(), text.as_bytes());
        let raw = match self.cache.get(&key) {
            Some(hit) => {
                debug!(key = %key, "L1 cache hit for query embedding");
                hit
            }
            None => {
                let embedding = self.text.encode_text(text).await?;
                self.cache.insert(key, &embedding);
                embedding
            }
        };
        padding::pad_into(raw, target_dims)
    }

    /// Encode image bytes with the image encoder and pad to `target_dims`.
    ///
    /// # Errors
    /// `ProviderUnavailable` when no image encoder is wired in.
    pub async fn encode_image(&self, image: &[u8], target_dims: usize) -> ShieldResult<Vec<f32>> {
        let encoder = self
            .image
            .as_ref()
            .ok_or_else(|| EmbeddingError::ProviderUnavailable {
                provider: "image-encoder".to_string(),
            })?;
        let raw = encoder.encode_image(image).await?;
        padding::pad_into(raw, target_dims)
    }

    pub fn has_image_encoder(&self) -> bool {
        self.image.is_some()
    }

    pub fn text_encoder_name(&self) -> &str {
        self.text.name()
    }

    pub fn text_dimensions(&self) -> usize {
        self.text.dimensions()
    }

    pub fn cache(&self) -> &L1MemoryCache {
        &self.cache
    }
}
