use chrono::Utc;
use scamshield_core::constants::MEMORY_RECORD_TYPE;
use scamshield_core::models::*;
use uuid::Uuid;

#[test]
fn memory_record_payload_carries_all_fields() {
    let record = MemoryRecord {
        id: Uuid::new_v4(),
        vector: vec![0.1, 0.2],
        timestamp: Utc::now(),
        original_input: "transfer funds".into(),
        verdict_summary: "High (90%): urgent transfer".into(),
        recommendations: vec!["Block the number".into()],
        risk_level: RiskLevel::High,
        probability: 0.9,
        content_hash: "abc".into(),
    };
    let payload = record.payload();
    assert_eq!(payload[payload_keys::ORIGINAL_INPUT], "transfer funds");
    assert_eq!(payload[payload_keys::RISK_LEVEL], "High");
    assert_eq!(payload[payload_keys::TYPE], MEMORY_RECORD_TYPE);
    assert_eq!(payload[payload_keys::RECOMMENDATIONS][0], "Block the number");

    let id = record.id.to_string();
    let point = record.into_point();
    assert_eq!(point.id, id);
    assert_eq!(point.vector.len(), 2);
}

#[test]
fn analysis_response_serializes_with_contract_field_names() {
    let response = AnalysisResponse {
        inputs_processed: 2,
        final_verdict: Verdict {
            probability: 0.7,
            risk_level: RiskLevel::High,
            analysis: "matches scam template".into(),
            recommendations: vec![],
            sources: vec![],
        },
        detailed_evidence: DetailedEvidence {
            text_matches: vec![CaseMatch {
                id: "1".into(),
                score: 0.9,
                risk_label: "scam".into(),
                text_snippet: "transfer now".into(),
                tier: Tier::Public,
            }],
            ..Default::default()
        },
    };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["inputs_processed"], 2);
    assert_eq!(json["final_verdict"]["risk_level"], "High");
    assert_eq!(json["detailed_evidence"]["text_matches"][0]["risk_label"], "scam");
    assert_eq!(json["detailed_evidence"]["text_matches"][0]["tier"], "public");
    assert!(json["detailed_evidence"]["visual_analysis"].is_array());
    assert_eq!(json["detailed_evidence"]["memory_context"], "");
}

#[test]
fn similarity_match_reads_payload_strings() {
    let mut payload = Payload::new();
    payload.insert("risk_label".into(), "legit".into());
    let m = SimilarityMatch::from_point(
        ScoredPoint {
            id: "7".into(),
            score: 0.4,
            payload,
        },
        Tier::Public,
    );
    assert_eq!(m.payload_str("risk_label"), Some("legit"));
    assert_eq!(m.payload_str("missing"), None);
}

#[test]
fn visual_risk_finding_line_names_level() {
    let risk = VisualRisk::unknown("no similar image");
    assert_eq!(risk.finding_line(), "Visual finding: Unknown risk - no similar image");
}
