//! Digest of recalled memory matches for the reasoning prompt.

use scamshield_core::models::payload_keys;
use scamshield_core::models::SimilarityMatch;

/// One line per gated memory match; empty when there are none.
pub fn render(matches: &[SimilarityMatch]) -> String {
    matches
        .iter()
        .map(|m| {
            format!(
                "Previously seen on {} (similarity {:.2}): verdict {}",
                m.payload_str(payload_keys::TIMESTAMP).unwrap_or("an unknown date"),
                m.score,
                m.payload_str(payload_keys::VERDICT_SUMMARY).unwrap_or("unavailable"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
