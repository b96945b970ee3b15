use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{Payload, Point, RiskLevel};
use crate::constants::MEMORY_RECORD_TYPE;

/// Payload keys written for every memory record.
pub mod payload_keys {
    pub const TIMESTAMP: &str = "timestamp";
    pub const ORIGINAL_INPUT: &str = "original_input";
    pub const VERDICT_SUMMARY: &str = "verdict_summary";
    pub const RECOMMENDATIONS: &str = "recommendations";
    pub const RISK_LEVEL: &str = "risk_level";
    pub const PROBABILITY: &str = "probability";
    pub const CONTENT_HASH: &str = "content_hash";
    pub const TYPE: &str = "type";
}

/// One persisted prior submission. Append-only: never updated or deleted
/// by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Fresh per write, never derived from content.
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub timestamp: DateTime<Utc>,
    /// Bounded excerpt of the fused document.
    pub original_input: String,
    pub verdict_summary: String,
    pub recommendations: Vec<String>,
    pub risk_level: RiskLevel,
    pub probability: f64,
    /// blake3 of the full fused document. Recorded only; not used for dedup.
    pub content_hash: String,
}

impl MemoryRecord {
    /// Payload as written to the memory collection.
    pub fn payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert(
            payload_keys::TIMESTAMP.to_string(),
            Value::String(self.timestamp.to_rfc3339()),
        );
        payload.insert(
            payload_keys::ORIGINAL_INPUT.to_string(),
            Value::String(self.original_input.clone()),
        );
        payload.insert(
            payload_keys::VERDICT_SUMMARY.to_string(),
            Value::String(self.verdict_summary.clone()),
        );
        payload.insert(
            payload_keys::RECOMMENDATIONS.to_string(),
            Value::Array(
                self.recommendations
                    .iter()
                    .cloned()
                    .map(Value::String)
                    .collect(),
            ),
        );
        payload.insert(
            payload_keys::RISK_LEVEL.to_string(),
            Value::String(self.risk_level.as_str().to_string()),
        );
        payload.insert(payload_keys::PROBABILITY.to_string(), Value::from(self.probability));
        payload.insert(
            payload_keys::CONTENT_HASH.to_string(),
            Value::String(self.content_hash.clone()),
        );
        payload.insert(
            payload_keys::TYPE.to_string(),
            Value::String(MEMORY_RECORD_TYPE.to_string()),
        );
        payload
    }

    /// Convert into a store point.
    pub fn into_point(self) -> Point {
        let payload = self.payload();
        Point {
            id: self.id.to_string(),
            vector: self.vector,
            payload,
        }
    }
}
