//! Gateway tests: padding of mixed-width encoders, cache behavior, and
//! the missing-image-encoder path.

use std::sync::Arc;

use scamshield_embeddings::{EmbeddingGateway, HashedTextEncoder};
use test_fixtures::doubles::{CountingEncoder, FixedImageEncoder};

// ═══════════════════════════════════════════════════════════════════════════
// Padding
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn image_vectors_are_zero_padded_to_collection_dims() {
    let gateway = EmbeddingGateway::new(
        Arc::new(HashedTextEncoder::new(1024)),
        Some(Arc::new(FixedImageEncoder::new(512, 0.25))),
        100,
    );
    let v = gateway.encode_image(b"fake-png", 1024).await.unwrap();
    assert_eq!(v.len(), 1024);
    assert!(v[..512].iter().all(|&x| x == 0.25));
    assert!(v[512..].iter().all(|&x| x == 0.0));
}

#[tokio::test]
async fn text_vector_wider_than_target_is_rejected() {
    let gateway = EmbeddingGateway::new(Arc::new(HashedTextEncoder::new(1024)), None, 100);
    assert!(gateway.encode_query("hello there", 512).await.is_err());
}

// ═══════════════════════════════════════════════════════════════════════════
// Cache
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn repeated_query_hits_cache() {
    let encoder = Arc::new(CountingEncoder::new(64));
    let gateway = EmbeddingGateway::new(encoder.clone(), None, 100);

    let a = gateway.encode_query("verify your account", 64).await.unwrap();
    let b = gateway.encode_query("verify your account", 64).await.unwrap();
    assert_eq!(a, b);
    assert_eq!(encoder.calls(), 1);

    gateway.encode_query("a different query", 64).await.unwrap();
    assert_eq!(encoder.calls(), 2);

    let stats = gateway.cache().stats();
    assert_eq!((stats.hits, stats.misses), (1, 2));
}

// ═══════════════════════════════════════════════════════════════════════════
// Image encoder absent
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn image_encoding_without_encoder_fails() {
    let gateway = EmbeddingGateway::new(Arc::new(HashedTextEncoder::new(64)), None, 10);
    assert!(!gateway.has_image_encoder());
    assert!(gateway.encode_image(b"bytes", 64).await.is_err());
}
