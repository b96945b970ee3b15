mod encoder;
mod extractor;
mod knowledge_store;
mod reasoning;

pub use encoder::IEncoder;
pub use extractor::IEvidenceExtractor;
pub use knowledge_store::IKnowledgeStore;
pub use reasoning::{IReasoningProvider, ReasoningRequest};
