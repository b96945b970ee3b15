//! Dual-tier retrieval: gating, padding, tier isolation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use scamshield_core::config::RetrievalConfig;
use scamshield_core::models::{CollectionSpec, RiskLevel, Tier};
use scamshield_retrieval::{RetrievalCoordinator, VisualMatcher};
use serde_json::json;
use test_fixtures::doubles::{scored, RecordingStore};

const PUBLIC: &str = "scam_genome";
const PRIVATE: &str = "user_memory";

fn coordinator(store: Arc<RecordingStore>) -> RetrievalCoordinator {
    RetrievalCoordinator::new(
        store,
        CollectionSpec::cosine(PUBLIC, 8),
        CollectionSpec::cosine(PRIVATE, 8),
        RetrievalConfig {
            search_timeout_secs: 1,
            ..Default::default()
        },
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Confidence gate
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn memory_below_gate_is_dropped() {
    let store = Arc::new(RecordingStore::new().with_results(
        PRIVATE,
        vec![scored("m1", 0.80, json!({"verdict_summary": "High (90%): scam"}))],
    ));
    let outcome = coordinator(store).retrieve(&[0.1; 8]).await;
    assert!(outcome.private.is_empty());
}

#[tokio::test]
async fn memory_above_gate_is_kept() {
    let store = Arc::new(RecordingStore::new().with_results(
        PRIVATE,
        vec![
            scored("m1", 0.91, json!({"timestamp": "2026-03-01T10:00:00+00:00", "verdict_summary": "High (90%): scam"})),
            scored("m2", 0.80, json!({})),
        ],
    ));
    let coord = coordinator(store);
    let outcome = coord.retrieve(&[0.1; 8]).await;
    assert_eq!(outcome.private.len(), 1);
    assert_eq!(outcome.private[0].tier, Tier::Private);
    assert_eq!(
        coord.memory_context(&outcome),
        "Previously seen on 2026-03-01T10:00:00+00:00 (similarity 0.91): verdict High (90%): scam"
    );
}

#[tokio::test]
async fn score_exactly_at_gate_passes() {
    let store = Arc::new(
        RecordingStore::new().with_results(PRIVATE, vec![scored("m1", 0.85, json!({}))]),
    );
    let outcome = coordinator(store).retrieve(&[0.1; 8]).await;
    assert_eq!(outcome.private.len(), 1);
}

#[tokio::test]
async fn public_tier_is_ungated_and_capped_at_k() {
    let hits = (0..8)
        .map(|i| scored(&format!("c{i}"), 0.1 * i as f32, json!({"risk_label": "scam", "text": "otp"})))
        .collect();
    let store = Arc::new(RecordingStore::new().with_results(PUBLIC, hits));
    let coord = coordinator(store.clone());
    let outcome = coord.retrieve(&[0.1; 8]).await;

    assert_eq!(outcome.public.len(), 5);
    assert_eq!(outcome.public[0].id, "c7");
    let searches = store.searches();
    let public = searches.iter().find(|s| s.collection == PUBLIC).unwrap();
    let private = searches.iter().find(|s| s.collection == PRIVATE).unwrap();
    assert_eq!(public.min_score, None);
    assert_eq!(private.min_score, Some(0.85));
    assert_eq!(private.k, 3);

    let cases = coord.case_matches(&outcome);
    assert_eq!(cases[0].risk_label, "scam");
    assert_eq!(cases[0].text_snippet, "otp");
}

// ═══════════════════════════════════════════════════════════════════════════
// Padding per tier
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn query_is_padded_to_each_tier() {
    let store = Arc::new(RecordingStore::new());
    let coord = RetrievalCoordinator::new(
        store.clone(),
        CollectionSpec::cosine(PUBLIC, 1024),
        CollectionSpec::cosine(PRIVATE, 768),
        RetrievalConfig::default(),
    );
    coord.retrieve(&[0.5; 512]).await;

    for call in store.searches() {
        let expected = if call.collection == PUBLIC { 1024 } else { 768 };
        assert_eq!(call.vector.len(), expected);
        assert!(call.vector[512..].iter().all(|&x| x == 0.0));
    }
}

#[tokio::test]
async fn query_wider_than_tier_degrades_that_tier_only() {
    let store = Arc::new(
        RecordingStore::new().with_results(PUBLIC, vec![scored("c1", 0.7, json!({}))]),
    );
    let coord = RetrievalCoordinator::new(
        store,
        CollectionSpec::cosine(PUBLIC, 1024),
        CollectionSpec::cosine(PRIVATE, 256),
        RetrievalConfig::default(),
    );
    let outcome = coord.retrieve(&[0.5; 512]).await;
    assert_eq!(outcome.public.len(), 1);
    assert!(outcome.private.is_empty());
    assert_eq!(outcome.degradations.len(), 1);
    assert_eq!(outcome.degradations[0].component, "retrieval.private");
}

// ═══════════════════════════════════════════════════════════════════════════
// Tier isolation
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn failing_public_tier_yields_empty_with_degradation() {
    let store = Arc::new(
        RecordingStore::new()
            .failing_search(PUBLIC)
            .with_results(PRIVATE, vec![scored("m1", 0.95, json!({}))]),
    );
    let outcome = coordinator(store).retrieve(&[0.1; 8]).await;
    assert!(outcome.public.is_empty());
    assert_eq!(outcome.private.len(), 1);
    assert!(outcome.is_degraded());
    assert_eq!(outcome.degradations[0].component, "retrieval.public");
    assert_eq!(outcome.degradations[0].fallback_used, "empty");
}

#[tokio::test]
async fn slow_tier_times_out_without_blocking_the_other() {
    let store = Arc::new(
        RecordingStore::new()
            .slow_search(PRIVATE, Duration::from_secs(10))
            .with_results(PUBLIC, vec![scored("c1", 0.6, json!({}))]),
    );
    let started = Instant::now();
    let outcome = coordinator(store).retrieve(&[0.1; 8]).await;
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(outcome.public.len(), 1);
    assert!(outcome.private.is_empty());
    assert_eq!(outcome.degradations[0].component, "retrieval.private");
}

#[tokio::test]
async fn tiers_run_concurrently() {
    let store = Arc::new(
        RecordingStore::new()
            .slow_search(PUBLIC, Duration::from_millis(300))
            .slow_search(PRIVATE, Duration::from_millis(300)),
    );
    let started = Instant::now();
    coordinator(store).retrieve(&[0.1; 8]).await;
    assert!(started.elapsed() < Duration::from_millis(550));
}

// ═══════════════════════════════════════════════════════════════════════════
// Visual matching
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn image_vector_is_padded_and_top_match_decides() {
    let store = Arc::new(RecordingStore::new().with_results(
        PUBLIC,
        vec![
            scored("img1", 0.31, json!({"risk_label": "scam", "filename": "fake_usdt.png"})),
            scored("img2", 0.20, json!({"risk_label": "legit"})),
        ],
    ));
    let matcher = VisualMatcher::new(
        store.clone(),
        CollectionSpec::cosine(PUBLIC, 1024),
        0.28,
        Duration::from_secs(1),
    );
    let risk = matcher.assess(&[0.2; 512]).await;
    assert_eq!(risk.risk_level, RiskLevel::High);
    assert!(risk.analysis.contains("fake_usdt.png"));

    let call = &store.searches()[0];
    assert_eq!(call.vector.len(), 1024);
    assert_eq!(call.k, 1);
}

#[tokio::test]
async fn visual_search_failure_is_unknown() {
    let store = Arc::new(RecordingStore::new().failing_search(PUBLIC));
    let matcher = VisualMatcher::new(
        store,
        CollectionSpec::cosine(PUBLIC, 1024),
        0.28,
        Duration::from_secs(1),
    );
    let risk = matcher.assess(&[0.2; 512]).await;
    assert_eq!(risk.risk_level, RiskLevel::Unknown);
    assert!(risk.analysis.contains("scripted search failure"));
}
