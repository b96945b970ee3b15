use serde::{Deserialize, Serialize};

use crate::constants::VERDICT_SUMMARY_ANALYSIS_CHARS;
use crate::text::char_prefix;

/// Risk classification of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a level name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The final risk verdict for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Scam probability in [0, 1].
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub sources: Vec<String>,
}

impl Verdict {
    /// One-line summary stored alongside memory records.
    pub fn summary(&self) -> String {
        format!(
            "{} ({:.0}%): {}",
            self.risk_level,
            self.probability * 100.0,
            char_prefix(self.analysis.trim(), VERDICT_SUMMARY_ANALYSIS_CHARS)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(RiskLevel::parse("HIGH"), Some(RiskLevel::High));
        assert_eq!(RiskLevel::parse(" medium "), Some(RiskLevel::Medium));
        assert_eq!(RiskLevel::parse("critical"), None);
    }

    #[test]
    fn serializes_as_capitalized_name() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");
    }

    #[test]
    fn summary_bounds_analysis() {
        let verdict = Verdict {
            probability: 0.7,
            risk_level: RiskLevel::High,
            analysis: "x".repeat(1000),
            recommendations: vec![],
            sources: vec![],
        };
        let summary = verdict.summary();
        assert!(summary.starts_with("High (70%): "));
        assert_eq!(summary.len(), "High (70%): ".len() + VERDICT_SUMMARY_ANALYSIS_CHARS);
    }
}
