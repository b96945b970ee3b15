//! # scamshield-embeddings
//!
//! Embedding gateway for the verdict engine. Wraps a text encoder and an
//! optional image encoder, caches query embeddings, and reconciles encoder
//! output with a collection's declared dimensionality.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingGateway
//! ├── text encoder
//! │   ├── ApiEncoder (OpenAI-compatible /v1/embeddings)
//! │   └── HashedTextEncoder (local, deterministic)
//! ├── image encoder (optional, injected)
//! ├── L1MemoryCache (moka, keyed by blake3 of the text)
//! └── padding (zero-pad to collection dims, never truncate)
//! ```

pub mod cache;
pub mod gateway;
pub mod padding;
pub mod providers;

pub use cache::{CacheStats, L1MemoryCache};
pub use gateway::EmbeddingGateway;
pub use providers::{ApiEncoder, HashedTextEncoder};
