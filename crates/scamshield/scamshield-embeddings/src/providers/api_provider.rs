//! OpenAI-compatible embedding client.
//!
//! Posts to a `/v1/embeddings` endpoint with bearer auth and retries with
//! exponential backoff. Once retries run out the encoder opens an outage
//! window and fails fast until it elapses or [`ApiEncoder::reset_availability`]
//! is called.

use std::fmt::Display;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use scamshield_core::config::EmbeddingConfig;
use scamshield_core::errors::{EmbeddingError, ShieldResult};
use scamshield_core::traits::IEncoder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const DEFAULT_EMBEDDINGS_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";

const DEFAULT_OUTAGE_COOLDOWN: Duration = Duration::from_secs(30);
const BACKOFF_BASE_MS: u64 = 100;

/// Remote text encoder.
pub struct ApiEncoder {
    client: reqwest::Client,
    model: String,
    api_key: String,
    endpoint: String,
    dimensions: usize,
    max_retries: u32,
    cooldown: Duration,
    outage_until: Mutex<Option<Instant>>,
}

#[derive(Serialize)]
struct EmbeddingsBody<'a> {
    model: &'a str,
    input: [&'a str; 1],
    dimensions: usize,
}

#[derive(Deserialize)]
struct EmbeddingsReply {
    data: Vec<EmbeddingRow>,
}

#[derive(Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

fn failed(reason: impl Display) -> EmbeddingError {
    EmbeddingError::InferenceFailed {
        reason: reason.to_string(),
    }
}

impl ApiEncoder {
    pub fn new(config: &EmbeddingConfig, api_key: String) -> ShieldResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| failed(format!("cannot build HTTP client: {e}")))?;
        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_EMBEDDINGS_ENDPOINT.to_string());
        Ok(Self {
            client,
            model: config.model.clone(),
            api_key,
            endpoint,
            dimensions: config.text_dimensions,
            max_retries: 2,
            cooldown: DEFAULT_OUTAGE_COOLDOWN,
            outage_until: Mutex::new(None),
        })
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// How long the encoder refuses calls after exhausting its retries.
    pub fn with_outage_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn is_available(&self) -> bool {
        match *self.outage() {
            Some(until) => Instant::now() >= until,
            None => true,
        }
    }

    pub fn reset_availability(&self) {
        if self.outage().take().is_some() {
            info!(model = %self.model, "embedding API outage cleared");
        }
    }

    fn outage(&self) -> std::sync::MutexGuard<'_, Option<Instant>> {
        self.outage_until
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    async fn embed_with_retries(&self, text: &str) -> ShieldResult<Vec<f32>> {
        if !self.is_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.model.clone(),
            }
            .into());
        }

        let mut last = failed("no attempt made");
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff = Duration::from_millis(BACKOFF_BASE_MS << (attempt - 1));
                debug!(attempt, ?backoff, "backing off before embedding retry");
                tokio::time::sleep(backoff).await;
            }
            match self.post_once(text).await {
                Ok(vector) => return Ok(vector),
                Err(e) => {
                    warn!(attempt, model = %self.model, error = %e, "embedding API call failed");
                    last = e;
                }
            }
        }

        *self.outage() = Some(Instant::now() + self.cooldown);
        Err(last.into())
    }

    async fn post_once(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let body = EmbeddingsBody {
            model: &self.model,
            input: [text],
            dimensions: self.dimensions,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| failed(format!("transport: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(failed(format!("status {status}: {detail}")));
        }

        let reply: EmbeddingsReply = response
            .json()
            .await
            .map_err(|e| failed(format!("malformed reply: {e}")))?;
        let vector = reply
            .data
            .into_iter()
            .next()
            .map(|row| row.embedding)
            .ok_or_else(|| failed("reply carried no embedding"))?;

        if vector.len() > self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }
        Ok(vector)
    }
}

#[async_trait]
impl IEncoder for ApiEncoder {
    async fn encode_text(&self, text: &str) -> ShieldResult<Vec<f32>> {
        self.embed_with_retries(text).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }
}
