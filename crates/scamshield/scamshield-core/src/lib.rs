//! # scamshield-core
//!
//! Foundation crate for the ScamShield verdict engine.
//! Defines the shared data model, the external-collaborator traits, errors,
//! config, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod text;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ShieldConfig;
pub use errors::{ErrorClass, ShieldError, ShieldResult};
pub use models::{
    EvidenceItem, FusedEvidence, MemoryRecord, Modality, RiskLevel, SimilarityMatch, Tier,
    Verdict,
};
