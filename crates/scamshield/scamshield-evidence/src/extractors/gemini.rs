//! Gemini `generateContent` extractor.
//!
//! OCR and transcription are both a single multimodal request: a fixed
//! instruction plus the raw bytes as base64 inline data.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use scamshield_core::config::ExtractionConfig;
use scamshield_core::errors::{ExtractionError, ShieldResult};
use scamshield_core::traits::IEvidenceExtractor;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const OCR_INSTRUCTION: &str =
    "Please transcribe all text from this image exactly as it appears. Output only the text.";
pub const TRANSCRIBE_INSTRUCTION: &str = "Please transcribe this audio file exactly as spoken.";

pub struct GeminiExtractor {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
pub(crate) struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    Inline { inline_data: InlineData<'a> },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl<'a> GenerateRequest<'a> {
    pub(crate) fn inline(instruction: &'a str, bytes: &[u8], mime_type: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: instruction },
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type,
                            data: BASE64.encode(bytes),
                        },
                    },
                ],
            }],
        }
    }
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    pub(crate) fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        Some(text)
    }
}

impl GeminiExtractor {
    pub fn new(config: &ExtractionConfig, api_key: String) -> ShieldResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| ExtractionError::NotConfigured {
                reason: format!("HTTP client error: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: config
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
            model: config.model.clone(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    async fn generate(
        &self,
        instruction: &str,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<String, ExtractionError> {
        let failed = |reason: String| ExtractionError::Failed {
            source_name: "gemini".to_string(),
            reason,
        };

        debug!(model = %self.model, mime_type, bytes = bytes.len(), "gemini extraction request");
        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateRequest::inline(instruction, bytes, mime_type))
            .send()
            .await
            .map_err(|e| failed(format!("HTTP error: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(failed(format!("API returned {status}: {body}")));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| failed(format!("JSON parse error: {e}")))?;
        body.text()
            .ok_or_else(|| failed("response had no candidates".to_string()))
    }
}

#[async_trait]
impl IEvidenceExtractor for GeminiExtractor {
    async fn extract_text(&self, image: &[u8], mime_type: &str) -> ShieldResult<String> {
        Ok(self.generate(OCR_INSTRUCTION, image, mime_type).await?)
    }

    async fn transcribe(&self, audio: &[u8], mime_type: &str) -> ShieldResult<String> {
        Ok(self.generate(TRANSCRIBE_INSTRUCTION, audio, mime_type).await?)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_instruction_and_base64_payload() {
        let req = GenerateRequest::inline(OCR_INSTRUCTION, b"abc", "image/png");
        let json = serde_json::to_value(&req).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], OCR_INSTRUCTION);
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "YWJj");
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"URGENT "},{"text":"pay now"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(body.text().as_deref(), Some("URGENT pay now"));
    }

    #[test]
    fn response_without_candidates_has_no_text() {
        let body: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(body.text().is_none());
    }

    #[test]
    fn url_uses_model_and_trims_slash() {
        let config = ExtractionConfig {
            endpoint: Some("http://localhost:8080/v1beta/".to_string()),
            ..Default::default()
        };
        let extractor = GeminiExtractor::new(&config, "k".to_string()).unwrap();
        assert_eq!(
            extractor.url(),
            format!("http://localhost:8080/v1beta/models/{}:generateContent", config.model)
        );
    }
}
