//! Payload schema adapters.
//!
//! Corpus points written by different ingestion paths name their text field
//! differently. Text resolves through an explicit ordered key list; the
//! first key holding non-empty text wins.

use scamshield_core::constants::LABEL_UNKNOWN;
use scamshield_core::models::{CaseMatch, Payload, SimilarityMatch};
use serde_json::Value;

/// Default text keys, in resolution order.
pub const TEXT_KEYS: &[&str] = &["original_text", "text", "content", "description"];

/// Default risk label keys, in resolution order.
pub const LABEL_KEYS: &[&str] = &["risk_label", "label"];

#[derive(Debug, Clone)]
pub struct PayloadSchema {
    text_keys: Vec<String>,
    label_keys: Vec<String>,
}

impl Default for PayloadSchema {
    fn default() -> Self {
        Self {
            text_keys: TEXT_KEYS.iter().map(|k| k.to_string()).collect(),
            label_keys: LABEL_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Render a payload value as text. Lists are joined with newlines; scalars
/// other than strings are not text.
fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

impl PayloadSchema {
    /// Prepend a key so it is tried before the defaults.
    pub fn with_text_key_first(mut self, key: impl Into<String>) -> Self {
        self.text_keys.insert(0, key.into());
        self
    }

    pub fn text_keys(&self) -> &[String] {
        &self.text_keys
    }

    /// First non-empty text field, in adapter order.
    pub fn resolve_text(&self, payload: &Payload) -> Option<String> {
        self.text_keys
            .iter()
            .find_map(|key| payload.get(key).and_then(value_text))
    }

    /// Risk label, lowercased; `unknown` when absent.
    pub fn resolve_label(&self, payload: &Payload) -> String {
        self.label_keys
            .iter()
            .find_map(|key| payload.get(key).and_then(Value::as_str))
            .map(|l| l.trim().to_ascii_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| LABEL_UNKNOWN.to_string())
    }

    /// Reasoning-ready view of a corpus match.
    pub fn case_match(&self, m: &SimilarityMatch) -> CaseMatch {
        CaseMatch {
            id: m.id.clone(),
            score: m.score,
            risk_label: self.resolve_label(&m.payload),
            text_snippet: self.resolve_text(&m.payload).unwrap_or_default(),
            tier: m.tier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> Payload {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn first_non_empty_key_wins() {
        let schema = PayloadSchema::default();
        let p = payload(json!({"original_text": "  ", "text": "chat log", "description": "desc"}));
        assert_eq!(schema.resolve_text(&p).as_deref(), Some("chat log"));
    }

    #[test]
    fn falls_through_to_description() {
        let schema = PayloadSchema::default();
        let p = payload(json!({"description": "Fake crypto dashboard"}));
        assert_eq!(schema.resolve_text(&p).as_deref(), Some("Fake crypto dashboard"));
    }

    #[test]
    fn list_values_join_with_newlines() {
        let schema = PayloadSchema::default();
        let p = payload(json!({"content": ["line one", "", "line two"]}));
        assert_eq!(schema.resolve_text(&p).as_deref(), Some("line one\nline two"));
    }

    #[test]
    fn non_text_values_are_skipped() {
        let schema = PayloadSchema::default();
        let p = payload(json!({"text": 42, "content": "real"}));
        assert_eq!(schema.resolve_text(&p).as_deref(), Some("real"));
        assert!(schema.resolve_text(&payload(json!({"score": 1}))).is_none());
    }

    #[test]
    fn custom_key_takes_precedence() {
        let schema = PayloadSchema::default().with_text_key_first("body");
        let p = payload(json!({"body": "custom", "text": "default"}));
        assert_eq!(schema.resolve_text(&p).as_deref(), Some("custom"));
    }

    #[test]
    fn label_resolution_order_and_default() {
        let schema = PayloadSchema::default();
        assert_eq!(schema.resolve_label(&payload(json!({"risk_label": "SCAM"}))), "scam");
        assert_eq!(schema.resolve_label(&payload(json!({"label": "legit"}))), "legit");
        assert_eq!(schema.resolve_label(&payload(json!({}))), "unknown");
    }
}
