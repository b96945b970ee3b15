//! OpenAI Chat Completions reasoning client.

use std::time::Duration;

use async_trait::async_trait;
use scamshield_core::errors::{ReasoningError, ShieldResult};
use scamshield_core::models::Verdict;
use scamshield_core::traits::{IReasoningProvider, ReasoningRequest};
use serde_json::{json, Value};
use tracing::debug;

use crate::parse::parse_verdict;
use crate::prompt::build_prompt;

pub const OPENAI_PROVIDER: &str = "openai";
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

const SYSTEM_MESSAGE: &str =
    "You are a financial fraud analyst. Respond with a single JSON object and nothing else.";

pub struct OpenAiReasoner {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

pub fn request_body(model: &str, prompt: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": SYSTEM_MESSAGE },
            { "role": "user", "content": prompt },
        ],
        "response_format": { "type": "json_object" },
        "temperature": 0.2,
    })
}

pub fn response_text(body: &Value) -> Option<String> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
}

impl OpenAiReasoner {
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
                provider: OPENAI_PROVIDER.to_string(),
                reason: format!("HTTP client error: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_OPENAI_ENDPOINT.to_string()),
            model: model.into(),
            api_key,
        })
    }
}

#[async_trait]
impl IReasoningProvider for OpenAiReasoner {
    async fn assess(&self, request: ReasoningRequest<'_>) -> ShieldResult<Verdict> {
        let prompt = build_prompt(&request);
        debug!(model = %self.model, prompt_chars = prompt.len(), "openai reasoning request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body(&self.model, &prompt))
            .send()
            .await
            .map_err(|e| ReasoningError::RequestFailed {
                provider: OPENAI_PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReasoningError::BadStatus {
                provider: OPENAI_PROVIDER.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ReasoningError::InvalidOutput {
                reason: format!("openai response is not JSON: {e}"),
            })?;
        let text = response_text(&body).ok_or_else(|| ReasoningError::InvalidOutput {
            reason: "openai response has no message content".to_string(),
        })?;
        Ok(parse_verdict(&text)?)
    }

    fn name(&self) -> &str {
        OPENAI_PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_uses_json_response_format() {
        let body = request_body("gpt-4o-mini", "prompt");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][1]["content"], "prompt");
        assert_eq!(body["response_format"]["type"], "json_object");
    }

    #[test]
    fn message_content_is_extracted() {
        let body = json!({"choices": [{"message": {"role": "assistant", "content": "{}"}}]});
        assert_eq!(response_text(&body).as_deref(), Some("{}"));
        assert!(response_text(&json!({"choices": []})).is_none());
    }
}
