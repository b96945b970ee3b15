//! Concrete evidence extractors.

pub mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use scamshield_core::config::ExtractionConfig;
use scamshield_core::errors::{ExtractionError, ShieldResult};
use scamshield_core::traits::IEvidenceExtractor;
use tracing::warn;

pub use gemini::GeminiExtractor;

/// Extractor used when no OCR/transcription backend is configured.
///
/// Every call fails with `NotConfigured`, so image and audio items are
/// excluded while text uploads still flow through.
pub struct UnconfiguredExtractor;

#[async_trait]
impl IEvidenceExtractor for UnconfiguredExtractor {
    async fn extract_text(&self, _image: &[u8], _mime_type: &str) -> ShieldResult<String> {
        Err(ExtractionError::NotConfigured {
            reason: "no OCR backend configured".to_string(),
        }
        .into())
    }

    async fn transcribe(&self, _audio: &[u8], _mime_type: &str) -> ShieldResult<String> {
        Err(ExtractionError::NotConfigured {
            reason: "no transcription backend configured".to_string(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "unconfigured"
    }
}

/// Build the extractor: Gemini when a Google API key is present.
pub fn create_extractor(
    config: &ExtractionConfig,
    google_api_key: Option<&str>,
) -> Arc<dyn IEvidenceExtractor> {
    match google_api_key {
        Some(key) => match GeminiExtractor::new(config, key.to_string()) {
            Ok(extractor) => Arc::new(extractor),
            Err(e) => {
                warn!(error = %e, "gemini extractor unavailable; image and audio evidence will be skipped");
                Arc::new(UnconfiguredExtractor)
            }
        },
        None => {
            warn!("GOOGLE_API_KEY not set; image and audio evidence will be skipped");
            Arc::new(UnconfiguredExtractor)
        }
    }
}
