//! # scamshield-engine
//!
//! The request pipeline. [`RiskEngine::analyze`] takes one submission of
//! uploads through every stage and returns a single verdict:
//!
//! ```text
//! uploads ─▶ extraction ─▶ visual matching (images) ─▶ fusion
//!                                                        │
//!            ┌───────────── embed truncated query ◀──────┘
//!            ▼
//!   dual-tier retrieval ─▶ verdict dispatch ─▶ response
//!                                     │
//!                                     └─▶ memory write (background)
//! ```
//!
//! [`ingest`] loads labelled corpus text and images into the case collection.

pub mod engine;
pub mod ingest;

pub use engine::{load_config, RiskEngine};
pub use ingest::{CorpusIngestor, IngestReport};
pub use scamshield_evidence::EvidenceUpload;
