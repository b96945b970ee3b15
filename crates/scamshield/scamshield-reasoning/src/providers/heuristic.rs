//! Similarity-average heuristic. The provider of last resort: always
//! available, no network, never fails.

use async_trait::async_trait;
use scamshield_core::constants::HEURISTIC_HIGH_RISK_THRESHOLD;
use scamshield_core::errors::ShieldResult;
use scamshield_core::models::{CaseMatch, RiskLevel, Verdict};
use scamshield_core::traits::{IReasoningProvider, ReasoningRequest};

pub const HEURISTIC_PROVIDER: &str = "heuristic";

pub struct HeuristicReasoner;

impl HeuristicReasoner {
    /// Mean case similarity, clamped to [0, 1]; 0 with no cases.
    pub fn probability(cases: &[CaseMatch]) -> f64 {
        if cases.is_empty() {
            return 0.0;
        }
        let mean = cases.iter().map(|c| f64::from(c.score)).sum::<f64>() / cases.len() as f64;
        mean.clamp(0.0, 1.0)
    }

    pub fn verdict(cases: &[CaseMatch]) -> Verdict {
        let probability = Self::probability(cases);
        let risk_level = if probability > HEURISTIC_HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else {
            RiskLevel::Low
        };
        let scam_cases = cases.iter().filter(|c| c.risk_label == "scam").count();
        let analysis = format!(
            "Automated heuristic assessment: the AI reasoning step was unavailable. \
             Average similarity to {} known case(s) is {:.2} ({} labeled scam). \
             Review the matched cases before acting.",
            cases.len(),
            probability,
            scam_cases
        );
        let sources = cases
            .iter()
            .map(|c| format!("Case {} (Risk: {}, Score: {:.2})", c.id, c.risk_label, c.score))
            .collect();

        Verdict {
            probability,
            risk_level,
            analysis,
            recommendations: Vec::new(),
            sources,
        }
    }
}

#[async_trait]
impl IReasoningProvider for HeuristicReasoner {
    async fn assess(&self, request: ReasoningRequest<'_>) -> ShieldResult<Verdict> {
        Ok(Self::verdict(request.cases))
    }

    fn name(&self) -> &str {
        HEURISTIC_PROVIDER
    }
}
