use serde::{Deserialize, Serialize};

use super::{Payload, ScoredPoint};

/// Which similarity-search collection a match came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// The pre-loaded case corpus of known scam and legitimate examples.
    Public,
    /// Prior user submissions (long-term memory).
    Private,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A retrieval result. Produced only by the retrieval coordinator and
/// read-only downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    pub id: String,
    /// Cosine similarity in [-1, 1].
    pub score: f32,
    pub payload: Payload,
    pub tier: Tier,
}

impl SimilarityMatch {
    pub fn from_point(point: ScoredPoint, tier: Tier) -> Self {
        Self {
            id: point.id,
            score: point.score,
            payload: point.payload,
            tier,
        }
    }

    /// Read a string field from the payload.
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(|v| v.as_str())
    }
}

/// Reasoning-ready view of a case corpus match, with its payload text resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseMatch {
    pub id: String,
    pub score: f32,
    pub risk_label: String,
    pub text_snippet: String,
    pub tier: Tier,
}
