//! Google Generative Language reasoning client.

use std::time::Duration;

use async_trait::async_trait;
use scamshield_core::errors::{ReasoningError, ShieldResult};
use scamshield_core::models::Verdict;
use scamshield_core::traits::{IReasoningProvider, ReasoningRequest};
use serde_json::{json, Value};
use tracing::debug;

use crate::parse::parse_verdict;
use crate::prompt::build_prompt;

pub const GEMINI_PROVIDER: &str = "gemini";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiReasoner {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

/// `generateContent` body asking for a JSON response.
pub fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "temperature": 0.2,
        }
    })
}

/// Text of the first candidate.
pub fn response_text(body: &Value) -> Option<String> {
    let parts = body.pointer("/candidates/0/content/parts")?.as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    (!text.is_empty()).then_some(text)
}

impl GeminiReasoner {
    pub fn new(
        api_key: String,
        model: impl Into<String>,
        endpoint: Option<String>,
        timeout: Duration,
    ) -> ShieldResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReasoningError::RequestFailed {
                provider: GEMINI_PROVIDER.to_string(),
                reason: format!("HTTP client error: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.into(),
            api_key,
        })
    }
}

#[async_trait]
impl IReasoningProvider for GeminiReasoner {
    async fn assess(&self, request: ReasoningRequest<'_>) -> ShieldResult<Verdict> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let prompt = build_prompt(&request);
        debug!(model = %self.model, prompt_chars = prompt.len(), "gemini reasoning request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body(&prompt))
            .send()
            .await
            .map_err(|e| ReasoningError::RequestFailed {
                provider: GEMINI_PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReasoningError::BadStatus {
                provider: GEMINI_PROVIDER.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ReasoningError::InvalidOutput {
                reason: format!("gemini response is not JSON: {e}"),
            })?;
        let text = response_text(&body).ok_or_else(|| ReasoningError::InvalidOutput {
            reason: "gemini response has no candidate text".to_string(),
        })?;
        Ok(parse_verdict(&text)?)
    }

    fn name(&self) -> &str {
        GEMINI_PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_requests_json_output() {
        let body = request_body("assess this");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "assess this");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn candidate_text_is_extracted() {
        let body = json!({"candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}}]});
        assert_eq!(response_text(&body).as_deref(), Some("{\"a\":1}"));
        assert!(response_text(&json!({"candidates": []})).is_none());
    }
}
