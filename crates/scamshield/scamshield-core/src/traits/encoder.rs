use async_trait::async_trait;

use crate::errors::{EmbeddingError, ShieldResult};

/// Embedding encoder. A pure function from content to a fixed-length vector.
#[async_trait]
pub trait IEncoder: Send + Sync {
    /// Encode text into a vector of `dimensions()` floats.
    async fn encode_text(&self, text: &str) -> ShieldResult<Vec<f32>>;

    /// Encode raw image bytes. Text-only encoders keep the default.
    async fn encode_image(&self, _image: &[u8]) -> ShieldResult<Vec<f32>> {
        Err(EmbeddingError::UnsupportedModality {
            provider: self.name().to_string(),
            modality: "image".to_string(),
        }
        .into())
    }

    /// The dimensionality of vectors produced by this encoder.
    fn dimensions(&self) -> usize;

    /// Human-readable encoder name.
    fn name(&self) -> &str;
}
