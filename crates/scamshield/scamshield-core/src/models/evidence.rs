use serde::{Deserialize, Serialize};

use crate::text::char_prefix;

/// Kind of uploaded artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Image,
    Audio,
    Text,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Text => "text",
        }
    }

    /// Header label naming how the fragment's text was obtained.
    pub fn source_label(&self) -> &'static str {
        match self {
            Self::Image => "Image Text (OCR)",
            Self::Audio => "Audio Transcript",
            Self::Text => "Text Content",
        }
    }
}

/// Raw content of an uploaded artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvidenceContent {
    Bytes(Vec<u8>),
    Text(String),
}

impl EvidenceContent {
    pub fn len(&self) -> usize {
        match self {
            Self::Bytes(b) => b.len(),
            Self::Text(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One uploaded artifact. Owned by the request that produced it.
///
/// Extraction consumes the item and returns an extracted copy; nothing
/// mutates an item in place afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceItem {
    pub source_name: String,
    pub modality: Modality,
    pub mime_type: String,
    pub content: EvidenceContent,
    pub extracted_text: Option<String>,
    /// One-line visual risk finding for images, when visual matching ran.
    pub visual_finding: Option<String>,
}

impl EvidenceItem {
    pub fn new(
        source_name: impl Into<String>,
        modality: Modality,
        mime_type: impl Into<String>,
        content: EvidenceContent,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            modality,
            mime_type: mime_type.into(),
            content,
            extracted_text: None,
            visual_finding: None,
        }
    }

    /// Convenience constructor for a plain-text item that needs no extraction.
    pub fn text(source_name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            source_name: source_name.into(),
            modality: Modality::Text,
            mime_type: "text/plain".to_string(),
            extracted_text: Some(text.clone()),
            content: EvidenceContent::Text(text),
            visual_finding: None,
        }
    }

    pub fn with_extracted_text(mut self, text: impl Into<String>) -> Self {
        self.extracted_text = Some(text.into());
        self
    }

    pub fn with_visual_finding(mut self, finding: impl Into<String>) -> Self {
        self.visual_finding = Some(finding.into());
        self
    }
}

/// One source-tagged piece of the fused document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceFragment {
    pub source_name: String,
    pub modality: Modality,
    pub text: String,
}

impl EvidenceFragment {
    /// Render the fragment with its provenance header.
    pub fn render(&self) -> String {
        format!(
            "--- Source: {} ({}) ---\n{}\n\n",
            self.source_name,
            self.modality.source_label(),
            self.text
        )
    }
}

/// All successfully extracted evidence of one submission, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusedEvidence {
    pub document: Vec<EvidenceFragment>,
    /// Bounded prefix of the rendered document, used only for embedding/search.
    pub truncated_query: String,
}

impl FusedEvidence {
    /// Build from ordered fragments. `truncated_query` is the first
    /// `query_char_cap` characters of the rendered document.
    pub fn new(document: Vec<EvidenceFragment>, query_char_cap: usize) -> Self {
        let rendered: String = document.iter().map(EvidenceFragment::render).collect();
        let truncated_query = char_prefix(&rendered, query_char_cap).to_string();
        Self {
            document,
            truncated_query,
        }
    }

    /// The full source-tagged document, as sent to the reasoning step.
    pub fn render(&self) -> String {
        self.document.iter().map(EvidenceFragment::render).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Number of evidence items that contributed text.
    pub fn inputs_processed(&self) -> usize {
        self.document.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(name: &str, modality: Modality, text: &str) -> EvidenceFragment {
        EvidenceFragment {
            source_name: name.to_string(),
            modality,
            text: text.to_string(),
        }
    }

    #[test]
    fn render_tags_source_and_modality() {
        let f = fragment("call.mp3", Modality::Audio, "hello");
        assert_eq!(f.render(), "--- Source: call.mp3 (Audio Transcript) ---\nhello\n\n");
    }

    #[test]
    fn truncated_query_is_prefix_of_document() {
        let fused = FusedEvidence::new(
            vec![
                fragment("a.txt", Modality::Text, &"a".repeat(50)),
                fragment("b.png", Modality::Image, &"b".repeat(50)),
            ],
            60,
        );
        assert_eq!(fused.truncated_query.chars().count(), 60);
        assert!(fused.render().starts_with(&fused.truncated_query));
    }

    #[test]
    fn short_document_is_not_padded() {
        let fused = FusedEvidence::new(vec![fragment("a.txt", Modality::Text, "hi")], 2000);
        assert_eq!(fused.truncated_query, fused.render());
        assert_eq!(fused.inputs_processed(), 1);
    }
}
