//! Concurrent per-item extraction.
//!
//! Every upload is classified and, for image and audio, handed to the
//! extractor under its own timeout. All items run at once; results come
//! back in submission order. A failed item never fails the batch.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use scamshield_core::errors::{ExtractionError, ShieldError};
use scamshield_core::models::{EvidenceContent, EvidenceItem, Modality};
use scamshield_core::traits::IEvidenceExtractor;
use scamshield_observability::extraction_span;
use scamshield_observability::tracing_setup::events;
use tracing::Instrument;

use crate::upload::EvidenceUpload;

/// Outcome of extracting one submission.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Successfully extracted items, in submission order.
    pub items: Vec<EvidenceItem>,
    pub failures: Vec<ExtractionError>,
    pub submitted: usize,
}

pub struct EvidenceExtraction {
    extractor: Arc<dyn IEvidenceExtractor>,
    timeout: Duration,
}

impl EvidenceExtraction {
    pub fn new(extractor: Arc<dyn IEvidenceExtractor>, timeout: Duration) -> Self {
        Self { extractor, timeout }
    }

    /// Classify and extract every upload concurrently.
    pub async fn extract_all(&self, uploads: Vec<EvidenceUpload>) -> ExtractionReport {
        let submitted = uploads.len();
        let outcomes = join_all(uploads.into_iter().map(|upload| self.extract_one(upload))).await;

        let mut report = ExtractionReport {
            submitted,
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                Ok(item) => report.items.push(item),
                Err(e) => report.failures.push(e),
            }
        }
        report
    }

    async fn extract_one(&self, upload: EvidenceUpload) -> Result<EvidenceItem, ExtractionError> {
        let filename = upload.filename.clone();
        let item = upload.into_item().inspect_err(|e| {
            events::extraction_failed(&filename, "unknown", &e.to_string());
        })?;

        let span = extraction_span!(item.source_name, item.modality.as_str());
        let modality = item.modality;
        let source = item.source_name.clone();
        let result = self.extract_item(item).instrument(span).await;
        if let Err(e) = &result {
            events::extraction_failed(&source, modality.as_str(), &e.to_string());
        }
        result
    }

    /// Fill in `extracted_text` for one classified item.
    pub async fn extract_item(&self, item: EvidenceItem) -> Result<EvidenceItem, ExtractionError> {
        if item.extracted_text.is_some() {
            return Ok(item);
        }
        let text = match &item.content {
            EvidenceContent::Text(t) => t.clone(),
            EvidenceContent::Bytes(bytes) => {
                let call = async {
                    match item.modality {
                        Modality::Image => {
                            self.extractor.extract_text(bytes, &item.mime_type).await
                        }
                        Modality::Audio => self.extractor.transcribe(bytes, &item.mime_type).await,
                        Modality::Text => Ok(String::from_utf8_lossy(bytes).into_owned()),
                    }
                };
                match tokio::time::timeout(self.timeout, call).await {
                    Ok(Ok(text)) => text,
                    Ok(Err(e)) => return Err(into_extraction_error(&item.source_name, e)),
                    Err(_) => {
                        return Err(ExtractionError::Timeout {
                            source_name: item.source_name.clone(),
                            timeout_secs: self.timeout.as_secs(),
                        })
                    }
                }
            }
        };
        Ok(item.with_extracted_text(text))
    }
}

fn into_extraction_error(source_name: &str, err: ShieldError) -> ExtractionError {
    match err {
        ShieldError::ExtractionError(ExtractionError::Failed { reason, .. }) => {
            ExtractionError::Failed {
                source_name: source_name.to_string(),
                reason,
            }
        }
        ShieldError::ExtractionError(inner) => inner,
        other => ExtractionError::Failed {
            source_name: source_name.to_string(),
            reason: other.to_string(),
        },
    }
}
