mod analysis;
mod collection;
mod degradation_event;
mod evidence;
mod memory_record;
mod similarity;
mod verdict;

pub use analysis::{AnalysisResponse, DetailedEvidence, VisualFinding, VisualRisk};
pub use collection::{CollectionSpec, Distance, Point, ScoredPoint};
pub use degradation_event::DegradationEvent;
pub use evidence::{EvidenceContent, EvidenceFragment, EvidenceItem, FusedEvidence, Modality};
pub use memory_record::{payload_keys, MemoryRecord};
pub use similarity::{CaseMatch, SimilarityMatch, Tier};
pub use verdict::{RiskLevel, Verdict};

/// Arbitrary key-value payload attached to a stored vector.
pub type Payload = serde_json::Map<String, serde_json::Value>;
