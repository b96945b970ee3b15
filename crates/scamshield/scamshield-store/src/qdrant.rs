//! Qdrant REST client.
//!
//! Only the four calls the engine needs: list, create, upsert, search.
//! Request bodies and response parsing are plain functions so they can be
//! checked without a cluster.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use scamshield_core::config::StoreConfig;
use scamshield_core::errors::{ShieldError, ShieldResult, StoreError};
use scamshield_core::models::{CollectionSpec, Payload, Point, ScoredPoint};
use scamshield_core::traits::IKnowledgeStore;
use serde_json::{json, Value};
use tracing::debug;

pub struct QdrantStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl QdrantStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> ShieldResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::RequestFailed {
                reason: format!("HTTP client error: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &StoreConfig) -> ShieldResult<Self> {
        let url = config
            .url
            .clone()
            .ok_or_else(|| ShieldError::ConfigError("store.url is required in cloud mode".into()))?;
        Self::new(
            url,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs.max(1)),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.api_key {
            Some(key) => builder.header("api-key", key),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value, StoreError> {
        let response = builder.send().await.map_err(|e| StoreError::RequestFailed {
            reason: e.to_string(),
        })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::MalformedResponse {
                reason: e.to_string(),
            })
    }
}

/// Body for `PUT /collections/{name}`.
pub fn create_collection_body(spec: &CollectionSpec) -> Value {
    json!({
        "vectors": {
            "size": spec.dimensions,
            "distance": spec.distance.as_str(),
        }
    })
}

/// Body for `PUT /collections/{name}/points`.
pub fn upsert_body(points: &[Point]) -> Value {
    let points: Vec<Value> = points
        .iter()
        .map(|p| {
            json!({
                "id": p.id,
                "vector": p.vector,
                "payload": p.payload,
            })
        })
        .collect();
    json!({ "points": points })
}

/// Body for `POST /collections/{name}/points/search`.
pub fn search_body(vector: &[f32], k: usize, min_score: Option<f32>) -> Value {
    let mut body = json!({
        "vector": vector,
        "limit": k,
        "with_payload": true,
    });
    if let Some(min) = min_score {
        body["score_threshold"] = json!(min);
    }
    body
}

/// Collection names from a `GET /collections` response.
pub fn parse_collections(body: &Value) -> Result<BTreeSet<String>, StoreError> {
    let list = body
        .pointer("/result/collections")
        .and_then(Value::as_array)
        .ok_or_else(|| StoreError::MalformedResponse {
            reason: "missing result.collections".to_string(),
        })?;
    Ok(list
        .iter()
        .filter_map(|c| c.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect())
}

/// Scored points from a search response. Numeric ids are stringified.
pub fn parse_search(body: &Value) -> Result<Vec<ScoredPoint>, StoreError> {
    let hits = body
        .get("result")
        .and_then(Value::as_array)
        .ok_or_else(|| StoreError::MalformedResponse {
            reason: "missing result array".to_string(),
        })?;

    hits.iter()
        .map(|hit| {
            let id = match hit.get("id") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => {
                    return Err(StoreError::MalformedResponse {
                        reason: "hit without id".to_string(),
                    })
                }
            };
            let score = hit.get("score").and_then(Value::as_f64).ok_or_else(|| {
                StoreError::MalformedResponse {
                    reason: format!("hit {id} without score"),
                }
            })? as f32;
            let payload = hit
                .get("payload")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_else(Payload::new);
            Ok(ScoredPoint { id, score, payload })
        })
        .collect()
}

#[async_trait]
impl IKnowledgeStore for QdrantStore {
    async fn list_collections(&self) -> ShieldResult<BTreeSet<String>> {
        let body = self.send(self.request(Method::GET, "/collections")).await?;
        Ok(parse_collections(&body)?)
    }

    async fn create_collection(&self, spec: &CollectionSpec) -> ShieldResult<()> {
        let path = format!("/collections/{}", spec.name);
        self.send(
            self.request(Method::PUT, &path)
                .json(&create_collection_body(spec)),
        )
        .await?;
        Ok(())
    }

    async fn upsert(&self, collection: &str, points: Vec<Point>) -> ShieldResult<()> {
        if points.is_empty() {
            return Ok(());
        }
        debug!(collection, count = points.len(), "qdrant upsert");
        let path = format!("/collections/{collection}/points?wait=true");
        self.send(self.request(Method::PUT, &path).json(&upsert_body(&points)))
            .await?;
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        k: usize,
        min_score: Option<f32>,
    ) -> ShieldResult<Vec<ScoredPoint>> {
        let path = format!("/collections/{collection}/points/search");
        let body = self
            .send(
                self.request(Method::POST, &path)
                    .json(&search_body(vector, k, min_score)),
            )
            .await?;
        Ok(parse_search(&body)?)
    }

    fn name(&self) -> &str {
        "qdrant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_declares_size_and_cosine() {
        let body = create_collection_body(&CollectionSpec::cosine("scam_genome", 1024));
        assert_eq!(body["vectors"]["size"], 1024);
        assert_eq!(body["vectors"]["distance"], "Cosine");
    }

    #[test]
    fn search_body_includes_threshold_only_when_gated() {
        let open = search_body(&[0.1, 0.2], 5, None);
        assert_eq!(open["limit"], 5);
        assert!(open.get("score_threshold").is_none());

        let gated = search_body(&[0.1, 0.2], 3, Some(0.85));
        assert!((gated["score_threshold"].as_f64().unwrap() - 0.85).abs() < 1e-6);
        assert_eq!(gated["with_payload"], true);
    }

    #[test]
    fn upsert_body_keeps_ids_and_payloads() {
        let mut payload = Payload::new();
        payload.insert("text".into(), json!("hello"));
        let body = upsert_body(&[Point {
            id: "0b7e0c4e-5f7a-4b8e-9d57-3c1f3f0b2a11".into(),
            vector: vec![0.5; 3],
            payload,
        }]);
        assert_eq!(body["points"][0]["id"], "0b7e0c4e-5f7a-4b8e-9d57-3c1f3f0b2a11");
        assert_eq!(body["points"][0]["payload"]["text"], "hello");
    }

    #[test]
    fn parses_collection_list() {
        let body = json!({"result": {"collections": [{"name": "scam_genome"}, {"name": "user_memory"}]}, "status": "ok"});
        let names = parse_collections(&body).unwrap();
        assert!(names.contains("scam_genome"));
        assert!(names.contains("user_memory"));
    }

    #[test]
    fn parses_search_hits_with_mixed_ids() {
        let body = json!({"result": [
            {"id": 7, "score": 0.91, "payload": {"risk_label": "scam"}},
            {"id": "abc", "score": 0.4}
        ]});
        let hits = parse_search(&body).unwrap();
        assert_eq!(hits[0].id, "7");
        assert!((hits[0].score - 0.91).abs() < 1e-6);
        assert_eq!(hits[0].payload["risk_label"], "scam");
        assert!(hits[1].payload.is_empty());
    }

    #[test]
    fn malformed_search_response_is_an_error() {
        assert!(parse_search(&json!({"status": "error"})).is_err());
        assert!(parse_search(&json!({"result": [{"score": 0.3}]})).is_err());
    }

    #[tokio::test]
    async fn unreachable_cluster_surfaces_request_error() {
        let store = QdrantStore::new("http://127.0.0.1:9", None, Duration::from_millis(500)).unwrap();
        let err = store.list_collections().await.unwrap_err();
        assert!(matches!(err, ShieldError::StoreError(StoreError::RequestFailed { .. })));
    }
}
