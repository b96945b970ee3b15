//! Visual risk matching for uploaded images.
//!
//! The image vector is padded to the case collection's dimensionality and
//! only the single best corpus match decides the outcome.

use std::sync::Arc;
use std::time::Duration;

use scamshield_core::constants::{LABEL_LEGIT, LABEL_SCAM};
use scamshield_core::models::{CollectionSpec, RiskLevel, ScoredPoint, VisualRisk};
use scamshield_core::traits::IKnowledgeStore;
use scamshield_embeddings::padding;
use tracing::warn;

use crate::schema::PayloadSchema;

pub struct VisualMatcher {
    store: Arc<dyn IKnowledgeStore>,
    collection: CollectionSpec,
    scam_threshold: f32,
    timeout: Duration,
    schema: PayloadSchema,
}

impl VisualMatcher {
    pub fn new(
        store: Arc<dyn IKnowledgeStore>,
        collection: CollectionSpec,
        scam_threshold: f32,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            collection,
            scam_threshold,
            timeout,
            schema: PayloadSchema::default(),
        }
    }

    /// Assess one image embedding. Never fails; store errors become
    /// `Unknown` with the error as the analysis.
    pub async fn assess(&self, image_vector: &[f32]) -> VisualRisk {
        let vector = match padding::pad_to(image_vector, self.collection.dimensions) {
            Ok(v) => v,
            Err(e) => return VisualRisk::unknown(e.to_string()),
        };
        let search = self.store.search(&self.collection.name, &vector, 1, None);
        match tokio::time::timeout(self.timeout, search).await {
            Ok(Ok(hits)) => self.classify(hits.into_iter().next()),
            Ok(Err(e)) => {
                warn!(error = %e, "visual match search failed");
                VisualRisk::unknown(e.to_string())
            }
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "visual match search timed out");
                VisualRisk::unknown(format!(
                    "visual search timed out after {}s",
                    self.timeout.as_secs()
                ))
            }
        }
    }

    /// Apply the top-1 decision rule.
    pub fn classify(&self, top: Option<ScoredPoint>) -> VisualRisk {
        let Some(top) = top else {
            return VisualRisk::unknown("No similar image found in database.");
        };
        let label = self.schema.resolve_label(&top.payload);
        let filename = top
            .payload
            .get("filename")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();
        let probability = f64::from(top.score).clamp(0.0, 1.0);

        let (risk_level, analysis) = if label == LABEL_SCAM && top.score > self.scam_threshold {
            (
                RiskLevel::High,
                format!(
                    "CRITICAL: Visual similarity to known scam evidence ({filename}). Do not trust this screenshot."
                ),
            )
        } else if label == LABEL_LEGIT {
            (
                RiskLevel::Low,
                "Verified: Matches interface of official/legit applications.".to_string(),
            )
        } else {
            (
                RiskLevel::Medium,
                "Suspicious: Image content is unclear but resembles financial charts.".to_string(),
            )
        };

        VisualRisk {
            risk_level,
            probability,
            analysis,
            source: Some(top.payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scamshield_core::models::Payload;
    use serde_json::json;

    fn matcher() -> VisualMatcher {
        VisualMatcher::new(
            Arc::new(test_fixtures::doubles::RecordingStore::new()),
            CollectionSpec::cosine("scam_genome", 4),
            0.28,
            Duration::from_secs(1),
        )
    }

    fn hit(score: f32, label: &str) -> ScoredPoint {
        let mut payload = Payload::new();
        payload.insert("risk_label".into(), json!(label));
        payload.insert("filename".into(), json!("fake_dashboard.png"));
        ScoredPoint {
            id: "1".into(),
            score,
            payload,
        }
    }

    #[test]
    fn no_match_is_unknown() {
        let risk = matcher().classify(None);
        assert_eq!(risk.risk_level, RiskLevel::Unknown);
        assert_eq!(risk.probability, 0.0);
        assert!(risk.source.is_none());
    }

    #[test]
    fn scam_above_threshold_is_high() {
        let risk = matcher().classify(Some(hit(0.35, "scam")));
        assert_eq!(risk.risk_level, RiskLevel::High);
        assert!(risk.analysis.contains("fake_dashboard.png"));
        assert!((risk.probability - 0.35).abs() < 1e-6);
    }

    #[test]
    fn scam_at_threshold_is_medium() {
        let risk = matcher().classify(Some(hit(0.28, "scam")));
        assert_eq!(risk.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn legit_is_low_regardless_of_score() {
        assert_eq!(matcher().classify(Some(hit(0.1, "legit"))).risk_level, RiskLevel::Low);
    }

    #[test]
    fn negative_score_clamps_probability() {
        let risk = matcher().classify(Some(hit(-0.4, "unknown")));
        assert_eq!(risk.risk_level, RiskLevel::Medium);
        assert_eq!(risk.probability, 0.0);
    }
}
