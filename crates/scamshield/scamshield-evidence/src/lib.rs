//! # scamshield-evidence
//!
//! Turns raw uploads into one source-tagged document.
//!
//! ```text
//! EvidenceUpload ──modality──▶ EvidenceItem ──extraction──▶ EvidenceItem(extracted)
//!                                                  │
//!                                   aggregator::fuse ▼
//!                                            FusedEvidence
//! ```
//!
//! Extraction runs every item concurrently and drops failures; fusion is pure.

pub mod aggregator;
pub mod extraction;
pub mod extractors;
pub mod modality;
pub mod upload;

pub use aggregator::fuse;
pub use extraction::EvidenceExtraction;
pub use extractors::{create_extractor, GeminiExtractor, UnconfiguredExtractor};
pub use upload::EvidenceUpload;
