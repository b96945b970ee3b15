//! Reasoning prompt construction.

use std::fmt::Write as _;

use scamshield_core::models::CaseMatch;
use scamshield_core::traits::ReasoningRequest;

/// Render retrieved cases the way the prompt lists them.
pub fn format_cases(cases: &[CaseMatch]) -> String {
    if cases.is_empty() {
        return "No similar known cases were found.".to_string();
    }
    cases
        .iter()
        .map(|c| {
            format!(
                "Case (Risk: {}, Score: {:.2}):\n{}",
                c.risk_label, c.score, c.text_snippet
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Full prompt for a reasoning provider.
pub fn build_prompt(request: &ReasoningRequest<'_>) -> String {
    let mut prompt = String::with_capacity(request.evidence.len() + 2048);
    prompt.push_str(
        "You are a risk analysis agent specialized in financial scams.\n\
         The evidence below may combine several sources:\n\
         1. VISUAL EVIDENCE: text read from screenshots, plus visual findings.\n\
         2. TEXTUAL EVIDENCE: chat logs or pasted messages.\n\
         3. AUDIO EVIDENCE: transcripts of voice messages or calls.\n\n",
    );

    prompt.push_str("--------------------------------------------------\n");
    prompt.push_str("USER SUBMISSION (EVIDENCE):\n");
    prompt.push_str(request.evidence);
    prompt.push_str("\n--------------------------------------------------\n\n");

    prompt.push_str("SIMILAR KNOWN PATTERNS (from the case database):\n");
    prompt.push_str(&format_cases(request.cases));
    prompt.push_str("\n--------------------------------------------------\n\n");

    if !request.memory_context.trim().is_empty() {
        let _ = write!(
            prompt,
            "PRIOR SUBMISSIONS FROM THIS USER'S HISTORY:\n{}\n\
             --------------------------------------------------\n\n",
            request.memory_context
        );
    }

    prompt.push_str(
        "TASK:\n\
         Analyze the evidence for signs of a scam.\n\
         - If a visual finding reports High risk or a fake dashboard, weight it heavily.\n\
         - If the text or audio matches known pig-butchering or tech-support scripts, flag it.\n\
         - If a prior submission closely matches, take its verdict into account.\n\
         - Give 3-4 specific, actionable recommendations (e.g. \"Block this number\", \
         \"Do not transfer crypto\", \"Report to local authorities\").\n\n\
         OUTPUT JSON ONLY:\n\
         {\n\
         \x20 \"probability\": <float 0.0 to 1.0>,\n\
         \x20 \"risk_level\": \"Low\" | \"Medium\" | \"High\",\n\
         \x20 \"analysis\": \"<explanation citing specific visual, text, or audio red flags>\",\n\
         \x20 \"recommendations\": [\"<step 1>\", \"<step 2>\", \"<step 3>\"],\n\
         \x20 \"sources\": [\"<similar cases you relied on>\"]\n\
         }\n",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use scamshield_core::models::Tier;

    fn case(label: &str, score: f32, text: &str) -> CaseMatch {
        CaseMatch {
            id: "1".into(),
            score,
            risk_label: label.into(),
            text_snippet: text.into(),
            tier: Tier::Public,
        }
    }

    #[test]
    fn cases_render_with_label_and_score() {
        let text = format_cases(&[case("scam", 0.876, "send otp"), case("legit", 0.2, "lunch")]);
        assert!(text.starts_with("Case (Risk: scam, Score: 0.88):\nsend otp"));
        assert!(text.contains("\n\nCase (Risk: legit, Score: 0.20):\nlunch"));
    }

    #[test]
    fn prompt_embeds_evidence_and_omits_empty_memory() {
        let cases = [case("scam", 0.9, "otp")];
        let request = ReasoningRequest {
            evidence: "--- Source: a.txt (Text Content) ---\nsend otp\n\n",
            cases: &cases,
            memory_context: "",
        };
        let prompt = build_prompt(&request);
        assert!(prompt.contains("--- Source: a.txt (Text Content) ---"));
        assert!(prompt.contains("Case (Risk: scam"));
        assert!(!prompt.contains("PRIOR SUBMISSIONS"));
        assert!(prompt.contains("\"risk_level\""));
    }

    #[test]
    fn prompt_includes_memory_when_present() {
        let request = ReasoningRequest {
            evidence: "x",
            cases: &[],
            memory_context: "Previously seen on 2026-01-01 (similarity 0.90): verdict High",
        };
        let prompt = build_prompt(&request);
        assert!(prompt.contains("PRIOR SUBMISSIONS"));
        assert!(prompt.contains("No similar known cases were found."));
    }
}
