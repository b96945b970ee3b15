//! Query embedding cache.

pub mod l1_memory;

pub use l1_memory::{CacheStats, L1MemoryCache};

/// Cache key for a piece of content: blake3 hex digest, namespaced by encoder.
pub fn content_key(encoder: &str, content: &[u8]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(encoder.as_bytes());
    hasher.update(&[0]);
    hasher.update(content);
    hasher.finalize().to_hex().to_string()
}
