//! Verdict validation for raw model output.
//!
//! Models wrap JSON in code fences and chatter around it. We strip fences,
//! parse the first JSON object in the text, and check every field. Anything
//! that fails a check is rejected as a whole; there is no partial repair.

use scamshield_core::errors::ReasoningError;
use scamshield_core::models::{RiskLevel, Verdict};
use serde_json::{Map, Value};

fn invalid(reason: impl Into<String>) -> ReasoningError {
    ReasoningError::InvalidOutput {
        reason: reason.into(),
    }
}

/// Remove Markdown code fences, keeping their contents.
pub fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```JSON", "").replace("```", "")
}

/// Parse the first JSON object embedded in `text`.
pub fn first_json_object(text: &str) -> Result<Map<String, Value>, ReasoningError> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        if let Some(Ok(Value::Object(map))) = stream.next() {
            return Ok(map);
        }
        search_from = start + 1;
    }
    Err(invalid("no JSON object in model output"))
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>, ReasoningError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid(format!("{key} must contain only strings")))
            })
            .collect(),
        Some(_) => Err(invalid(format!("{key} must be an array of strings"))),
    }
}

/// Check a verdict's numeric range.
pub fn validate(verdict: &Verdict) -> Result<(), ReasoningError> {
    if !verdict.probability.is_finite() || !(0.0..=1.0).contains(&verdict.probability) {
        return Err(invalid(format!(
            "probability {} is outside [0, 1]",
            verdict.probability
        )));
    }
    Ok(())
}

/// Validate raw model output into a [`Verdict`].
pub fn parse_verdict(raw: &str) -> Result<Verdict, ReasoningError> {
    let obj = first_json_object(&strip_fences(raw))?;

    let probability = obj
        .get("probability")
        .and_then(Value::as_f64)
        .ok_or_else(|| invalid("probability missing or not a number"))?;

    let level_text = obj
        .get("risk_level")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("risk_level missing or not a string"))?;
    let risk_level = RiskLevel::parse(level_text)
        .ok_or_else(|| invalid(format!("unknown risk_level {level_text:?}")))?;

    let analysis = obj
        .get("analysis")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("analysis missing or not a string"))?
        .to_string();

    let verdict = Verdict {
        probability,
        risk_level,
        analysis,
        recommendations: string_list(&obj, "recommendations")?,
        sources: string_list(&obj, "sources")?,
    };
    validate(&verdict)?;
    Ok(verdict)
}
