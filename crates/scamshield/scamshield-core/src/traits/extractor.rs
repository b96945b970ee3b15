use async_trait::async_trait;

use crate::errors::ShieldResult;

/// Turns non-text evidence into plain text (OCR / transcription).
#[async_trait]
pub trait IEvidenceExtractor: Send + Sync {
    /// Transcribe all text visible in an image.
    async fn extract_text(&self, image: &[u8], mime_type: &str) -> ShieldResult<String>;

    /// Transcribe spoken audio.
    async fn transcribe(&self, audio: &[u8], mime_type: &str) -> ShieldResult<String>;

    fn name(&self) -> &str;
}
