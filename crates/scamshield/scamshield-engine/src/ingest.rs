//! Corpus ingestion into the case collection.
//!
//! Text corpora are blank-line separated chunks, optionally numbered
//! (`12. `). Images are encoded with the gateway's image encoder. Point ids
//! are derived from content, so re-ingesting the same corpus overwrites
//! instead of duplicating.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use scamshield_core::constants::{CATEGORY_GROUND_TRUTH, CATEGORY_IMAGE_EVIDENCE};
use scamshield_core::errors::ShieldResult;
use scamshield_core::models::{CollectionSpec, Payload, Point};
use scamshield_core::traits::IKnowledgeStore;
use scamshield_embeddings::EmbeddingGateway;
use serde_json::Value;
use tracing::{info, warn};

/// Description stored with legitimate text corpus entries.
pub const LEGIT_CORPUS_DESCRIPTION: &str = "Safe conversations (Normal banking)";
/// Description stored with scam text corpus entries.
pub const SCAM_CORPUS_DESCRIPTION: &str = "The pre-loaded data (Pig Butchering scripts, etc.)";

static NUMBERING: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\d+\.\s*").ok());

/// Split a corpus into cleaned chunks: blank-line separated, leading
/// numbering removed, empties dropped.
pub fn parse_corpus(raw: &str) -> Vec<String> {
    raw.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| match NUMBERING.as_ref() {
            Some(re) => re.replace(chunk, "").trim().to_string(),
            None => chunk.to_string(),
        })
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

pub fn text_payload(text: &str, risk_label: &str, description: &str) -> Payload {
    let mut payload = Payload::new();
    payload.insert("text".into(), Value::String(text.to_string()));
    payload.insert("category".into(), Value::String(CATEGORY_GROUND_TRUTH.into()));
    payload.insert("risk_label".into(), Value::String(risk_label.to_string()));
    payload.insert("description".into(), Value::String(description.to_string()));
    payload
}

pub fn image_payload(filename: &str, risk_label: &str) -> Payload {
    let mut payload = Payload::new();
    payload.insert("category".into(), Value::String(CATEGORY_IMAGE_EVIDENCE.into()));
    payload.insert("risk_label".into(), Value::String(risk_label.to_string()));
    payload.insert(
        "description".into(),
        Value::String(format!("{risk_label} screenshot: {filename}")),
    );
    payload.insert("source".into(), Value::String("manual_collection".into()));
    payload.insert("filename".into(), Value::String(filename.to_string()));
    payload.insert("type".into(), Value::String("screenshot".into()));
    payload
}

/// Stable UUID derived from the blake3 hash of `parts`.
pub fn content_id(parts: &[&[u8]]) -> String {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part);
        hasher.update(&[0]);
    }
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hasher.finalize().as_bytes()[..16]);
    uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
}

/// Result of one image ingestion run.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub ingested: usize,
    /// `(filename, reason)` for every image that was skipped.
    pub failed: Vec<(String, String)>,
}

pub struct CorpusIngestor {
    gateway: Arc<EmbeddingGateway>,
    store: Arc<dyn IKnowledgeStore>,
    collection: CollectionSpec,
    batch_size: usize,
}

impl CorpusIngestor {
    pub fn new(
        gateway: Arc<EmbeddingGateway>,
        store: Arc<dyn IKnowledgeStore>,
        collection: CollectionSpec,
        batch_size: usize,
    ) -> Self {
        Self {
            gateway,
            store,
            collection,
            batch_size: batch_size.max(1),
        }
    }

    /// Embed and upsert every chunk of a labelled text corpus.
    ///
    /// Returns the number of points written.
    pub async fn ingest_text(
        &self,
        raw: &str,
        risk_label: &str,
        description: &str,
    ) -> ShieldResult<usize> {
        let chunks = parse_corpus(raw);
        let mut points = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let vector = self
                .gateway
                .encode_query(chunk, self.collection.dimensions)
                .await?;
            points.push(Point {
                id: content_id(&[risk_label.as_bytes(), chunk.as_bytes()]),
                vector,
                payload: text_payload(chunk, risk_label, description),
            });
        }
        self.upsert_batched(points).await
    }

    /// Embed and upsert labelled images. A failing image is skipped and
    /// reported; it doesn't stop the run.
    pub async fn ingest_images(
        &self,
        images: Vec<(String, Vec<u8>)>,
        risk_label: &str,
    ) -> ShieldResult<IngestReport> {
        let mut report = IngestReport::default();
        let mut points = Vec::with_capacity(images.len());
        for (filename, bytes) in images {
            match self
                .gateway
                .encode_image(&bytes, self.collection.dimensions)
                .await
            {
                Ok(vector) => points.push(Point {
                    id: content_id(&[risk_label.as_bytes(), &bytes]),
                    vector,
                    payload: image_payload(&filename, risk_label),
                }),
                Err(e) => {
                    warn!(filename = %filename, error = %e, "image skipped during ingestion");
                    report.failed.push((filename, e.to_string()));
                }
            }
        }
        report.ingested = self.upsert_batched(points).await?;
        Ok(report)
    }

    async fn upsert_batched(&self, points: Vec<Point>) -> ShieldResult<usize> {
        let total = points.len();
        let mut batch = Vec::with_capacity(self.batch_size);
        for point in points {
            batch.push(point);
            if batch.len() == self.batch_size {
                self.store
                    .upsert(&self.collection.name, std::mem::take(&mut batch))
                    .await?;
            }
        }
        if !batch.is_empty() {
            self.store.upsert(&self.collection.name, batch).await?;
        }
        info!(collection = %self.collection.name, points = total, "corpus ingested");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_numbering_and_blank_chunks() {
        let raw = "1. First message\n\n\n\n309.   Second\nline two\n\nno number\n\n12. \n";
        assert_eq!(
            parse_corpus(raw),
            vec!["First message", "Second\nline two", "no number"]
        );
    }

    #[test]
    fn only_leading_numbering_is_removed() {
        assert_eq!(parse_corpus("Pay 2. now"), vec!["Pay 2. now"]);
    }

    #[test]
    fn crlf_corpora_split_the_same() {
        assert_eq!(parse_corpus("1. a\r\n\r\n2. b"), vec!["a", "b"]);
    }

    #[test]
    fn content_id_is_stable_and_label_scoped() {
        let a = content_id(&[b"scam", b"text"]);
        assert_eq!(a, content_id(&[b"scam", b"text"]));
        assert_ne!(a, content_id(&[b"legit", b"text"]));
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn image_payload_describes_screenshot() {
        let p = image_payload("otp.png", "scam");
        assert_eq!(p["category"], "image_evidence");
        assert_eq!(p["description"], "scam screenshot: otp.png");
        assert_eq!(p["type"], "screenshot");
    }
}
