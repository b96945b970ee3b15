use scamshield_core::errors::ExtractionError;
use scamshield_core::models::{EvidenceContent, EvidenceItem, Modality};

use crate::modality;

/// One raw upload as received at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceUpload {
    pub filename: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl EvidenceUpload {
    pub fn new(filename: impl Into<String>, mime_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.map(str::to_string),
            bytes,
        }
    }

    /// Plain-text upload, e.g. a pasted chat log.
    pub fn text(filename: impl Into<String>, text: &str) -> Self {
        Self::new(filename, Some("text/plain"), text.as_bytes().to_vec())
    }

    /// Classify the upload and turn it into an [`EvidenceItem`].
    ///
    /// Text is decoded as lossy UTF-8 here; image and audio bytes are kept
    /// for the extractor.
    pub fn into_item(self) -> Result<EvidenceItem, ExtractionError> {
        let modality = modality::detect(&self.filename, self.mime_type.as_deref()).ok_or_else(
            || ExtractionError::UnsupportedType {
                source_name: self.filename.clone(),
                detail: self
                    .mime_type
                    .clone()
                    .unwrap_or_else(|| "unknown file type".to_string()),
            },
        )?;
        let mime_type = self
            .mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| modality::infer_mime(&self.filename, modality));

        let item = match modality {
            Modality::Text => {
                let text = String::from_utf8_lossy(&self.bytes).into_owned();
                EvidenceItem::new(
                    self.filename,
                    modality,
                    mime_type,
                    EvidenceContent::Text(text.clone()),
                )
                .with_extracted_text(text)
            }
            Modality::Image | Modality::Audio => EvidenceItem::new(
                self.filename,
                modality,
                mime_type,
                EvidenceContent::Bytes(self.bytes),
            ),
        };
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_upload_is_pre_extracted() {
        let item = EvidenceUpload::text("chat.txt", "hello").into_item().unwrap();
        assert_eq!(item.modality, Modality::Text);
        assert_eq!(item.extracted_text.as_deref(), Some("hello"));
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let item = EvidenceUpload::new("chat.txt", None, vec![b'h', 0xff, b'i'])
            .into_item()
            .unwrap();
        assert_eq!(item.extracted_text.as_deref(), Some("h\u{fffd}i"));
    }

    #[test]
    fn audio_without_mime_gets_inferred_type() {
        let item = EvidenceUpload::new("voicemail.wav", None, vec![0; 4])
            .into_item()
            .unwrap();
        assert_eq!(item.modality, Modality::Audio);
        assert_eq!(item.mime_type, "audio/wav");
        assert!(item.extracted_text.is_none());
    }

    #[test]
    fn unsupported_upload_is_an_extraction_error() {
        let err = EvidenceUpload::new("payload.exe", None, vec![1, 2])
            .into_item()
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType { .. }));
    }
}
