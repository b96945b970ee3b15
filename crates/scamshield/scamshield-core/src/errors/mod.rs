mod embedding_error;
mod extraction_error;
mod reasoning_error;
mod retrieval_error;
mod shield_error;
mod store_error;

pub use embedding_error::EmbeddingError;
pub use extraction_error::ExtractionError;
pub use reasoning_error::ReasoningError;
pub use retrieval_error::RetrievalError;
pub use shield_error::{ErrorClass, ShieldError, ShieldResult};
pub use store_error::StoreError;
