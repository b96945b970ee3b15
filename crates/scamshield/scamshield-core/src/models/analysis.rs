use serde::{Deserialize, Serialize};

use super::{CaseMatch, Payload, RiskLevel, Verdict};

/// Visual risk assessment of one uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualRisk {
    pub risk_level: RiskLevel,
    pub probability: f64,
    pub analysis: String,
    /// Payload of the best-matching corpus image, when there was one.
    pub source: Option<Payload>,
}

impl VisualRisk {
    pub fn unknown(analysis: impl Into<String>) -> Self {
        Self {
            risk_level: RiskLevel::Unknown,
            probability: 0.0,
            analysis: analysis.into(),
            source: None,
        }
    }

    /// Line appended to the image's fragment in the fused document.
    pub fn finding_line(&self) -> String {
        format!("Visual finding: {} risk - {}", self.risk_level, self.analysis)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualFinding {
    pub filename: String,
    pub visual_risk: VisualRisk,
}

/// Supporting evidence returned next to the verdict.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetailedEvidence {
    pub visual_analysis: Vec<VisualFinding>,
    pub text_matches: Vec<CaseMatch>,
    pub aggregated_text: String,
    pub memory_context: String,
}

/// Response of one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub inputs_processed: usize,
    pub final_verdict: Verdict,
    pub detailed_evidence: DetailedEvidence,
}
