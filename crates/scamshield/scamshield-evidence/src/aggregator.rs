//! Evidence fusion.
//!
//! Pure: ordered extracted items in, one [`FusedEvidence`] out.

use scamshield_core::errors::{ShieldError, ShieldResult};
use scamshield_core::models::{EvidenceFragment, EvidenceItem, FusedEvidence, Modality};

/// Build the fragment for one item, or `None` when it contributes no text.
///
/// Images append their visual finding line, so an image with a finding but
/// no OCR text still contributes.
pub fn fragment_for(item: &EvidenceItem) -> Option<EvidenceFragment> {
    let extracted = item.extracted_text.as_deref().map(str::trim).unwrap_or("");
    let finding = match item.modality {
        Modality::Image => item
            .visual_finding
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty()),
        _ => None,
    };

    let text = match (extracted.is_empty(), finding) {
        (true, None) => return None,
        (true, Some(f)) => f.to_string(),
        (false, None) => extracted.to_string(),
        (false, Some(f)) => format!("{extracted}\n{f}"),
    };

    Some(EvidenceFragment {
        source_name: item.source_name.clone(),
        modality: item.modality,
        text,
    })
}

/// Fuse extracted items into one source-tagged document.
///
/// `submitted` is the number of items originally received, used only for
/// the error when nothing survives.
///
/// # Errors
/// `EmptyEvidence` when no item contributes text.
pub fn fuse(
    items: &[EvidenceItem],
    submitted: usize,
    query_char_cap: usize,
) -> ShieldResult<FusedEvidence> {
    let fragments: Vec<EvidenceFragment> = items.iter().filter_map(fragment_for).collect();
    if fragments.is_empty() {
        return Err(ShieldError::EmptyEvidence { submitted });
    }
    Ok(FusedEvidence::new(fragments, query_char_cap))
}
