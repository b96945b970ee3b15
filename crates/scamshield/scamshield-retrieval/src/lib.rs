//! # scamshield-retrieval
//!
//! Given one query vector, searches the public case corpus (top-K, ungated)
//! and the private memory collection (top-K', gated at a similarity
//! threshold) concurrently. A failing tier degrades to empty.
//!
//! Also hosts the payload schema adapters, memory-context rendering and
//! the top-1 visual risk rule for images.

pub mod coordinator;
pub mod memory_context;
pub mod schema;
pub mod visual;

pub use coordinator::{RetrievalCoordinator, RetrievalOutcome};
pub use schema::PayloadSchema;
pub use visual::VisualMatcher;
