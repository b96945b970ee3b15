//! Memory writer: record shape, append-only ids, best-effort failures.

use std::sync::Arc;
use std::time::Duration;

use scamshield_core::config::MemoryConfig;
use scamshield_core::models::{
    payload_keys, CollectionSpec, EvidenceFragment, FusedEvidence, Modality, RiskLevel,
};
use scamshield_memory::MemoryWriter;
use serde_json::Value;
use test_fixtures::doubles::{verdict, RecordingStore};

const COLLECTION: &str = "user_memory";

fn fused(text: &str) -> FusedEvidence {
    FusedEvidence::new(
        vec![EvidenceFragment {
            source_name: "chat.txt".into(),
            modality: Modality::Text,
            text: text.into(),
        }],
        2000,
    )
}

fn writer(store: Arc<RecordingStore>, config: MemoryConfig) -> MemoryWriter {
    MemoryWriter::new(store, CollectionSpec::cosine(COLLECTION, 4), config)
}

// ═══════════════════════════════════════════════════════════════════════════
// Record construction
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn record_carries_verdict_and_bounded_excerpt() {
    let store = Arc::new(RecordingStore::new());
    let w = writer(
        store,
        MemoryConfig {
            excerpt_chars: 30,
            ..Default::default()
        },
    );
    let mut v = verdict(RiskLevel::High, 0.9);
    v.recommendations = vec!["Block the sender".into()];
    let evidence = fused(&"send otp now ".repeat(20));

    let record = w.build_record(&evidence, vec![0.1, 0.2, 0.3, 0.4], &v);
    assert_eq!(record.original_input.chars().count(), 30);
    assert!(evidence.render().starts_with(&record.original_input));
    assert_eq!(record.verdict_summary, v.summary());
    assert_eq!(record.recommendations, vec!["Block the sender".to_string()]);
    assert_eq!(record.risk_level, RiskLevel::High);
    assert_eq!(
        record.content_hash,
        blake3::hash(evidence.render().as_bytes()).to_hex().to_string()
    );
}

#[test]
fn identical_submissions_get_distinct_ids() {
    let w = writer(Arc::new(RecordingStore::new()), MemoryConfig::default());
    let evidence = fused("same text");
    let v = verdict(RiskLevel::Low, 0.1);
    let a = w.build_record(&evidence, vec![0.0; 4], &v);
    let b = w.build_record(&evidence, vec![0.0; 4], &v);
    assert_ne!(a.id, b.id);
    assert_eq!(a.content_hash, b.content_hash);
}

// ═══════════════════════════════════════════════════════════════════════════
// Background persistence
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn spawned_write_lands_after_shutdown() {
    let store = Arc::new(RecordingStore::new());
    let w = writer(store.clone(), MemoryConfig::default());

    let id = w
        .spawn_persist(&fused("urgent: verify your account"), vec![0.5; 4], &verdict(RiskLevel::High, 0.8))
        .expect("record id");
    w.shutdown().await;

    let points = store.upserted_points(COLLECTION);
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].id, id.to_string());
    assert_eq!(
        points[0].payload.get(payload_keys::TYPE),
        Some(&Value::String("user_submission".into()))
    );
    assert_eq!(
        points[0].payload.get(payload_keys::RISK_LEVEL),
        Some(&Value::String("High".into()))
    );
}

#[tokio::test]
async fn each_call_appends_a_new_record() {
    let store = Arc::new(RecordingStore::new());
    let w = writer(store.clone(), MemoryConfig::default());
    let evidence = fused("same");
    let v = verdict(RiskLevel::Low, 0.1);

    let a = w.spawn_persist(&evidence, vec![0.1; 4], &v);
    let b = w.spawn_persist(&evidence, vec![0.1; 4], &v);
    w.shutdown().await;

    assert_ne!(a, b);
    assert_eq!(store.upserts().len(), 2);
}

#[tokio::test]
async fn empty_document_is_not_persisted() {
    let store = Arc::new(RecordingStore::new());
    let w = writer(store.clone(), MemoryConfig::default());
    let empty = FusedEvidence::new(Vec::new(), 2000);

    assert!(w.spawn_persist(&empty, vec![0.0; 4], &verdict(RiskLevel::Low, 0.0)).is_none());
    w.shutdown().await;
    assert!(store.upserts().is_empty());
}

#[tokio::test]
async fn disabled_memory_skips_writes() {
    let store = Arc::new(RecordingStore::new());
    let w = writer(
        store.clone(),
        MemoryConfig {
            enabled: false,
            ..Default::default()
        },
    );
    assert!(w
        .spawn_persist(&fused("text"), vec![0.0; 4], &verdict(RiskLevel::Low, 0.0))
        .is_none());
    w.shutdown().await;
    assert!(store.upserts().is_empty());
}

#[tokio::test]
async fn writes_after_shutdown_are_refused() {
    let store = Arc::new(RecordingStore::new());
    let w = writer(store.clone(), MemoryConfig::default());
    w.shutdown().await;
    assert!(w
        .spawn_persist(&fused("late"), vec![0.0; 4], &verdict(RiskLevel::Low, 0.0))
        .is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// Failures are swallowed
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn failed_upsert_is_swallowed() {
    let store = Arc::new(RecordingStore::new().failing_upserts());
    let w = writer(store.clone(), MemoryConfig::default());
    let record = w.build_record(&fused("x"), vec![0.0; 4], &verdict(RiskLevel::Low, 0.1));
    assert!(!w.persist(record).await);
}

#[tokio::test]
async fn slow_upsert_times_out() {
    let store = Arc::new(RecordingStore::new().slow_upserts(Duration::from_secs(5)));
    let w = writer(
        store.clone(),
        MemoryConfig {
            persist_timeout_secs: 0,
            ..Default::default()
        },
    );
    let record = w.build_record(&fused("x"), vec![0.0; 4], &verdict(RiskLevel::Low, 0.1));
    assert!(!w.persist(record).await);
    assert!(store.upserts().is_empty());
}
