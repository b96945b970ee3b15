//! Test doubles for the external collaborators.
//!
//! Everything here is deterministic and in-process. Doubles record what they
//! were asked so tests can assert on calls as well as results.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use scamshield_core::errors::{
    EmbeddingError, ExtractionError, ReasoningError, ShieldResult, StoreError,
};
use scamshield_core::models::{
    CollectionSpec, Payload, Point, RiskLevel, ScoredPoint, Verdict,
};
use scamshield_core::traits::{
    IEncoder, IEvidenceExtractor, IKnowledgeStore, IReasoningProvider, ReasoningRequest,
};
use serde_json::Value;

// ─── helpers ────────────────────────────────────────────────────────────────

/// Build a scored point from a JSON object payload.
pub fn scored(id: &str, score: f32, payload: Value) -> ScoredPoint {
    ScoredPoint {
        id: id.to_string(),
        score,
        payload: payload.as_object().cloned().unwrap_or_default(),
    }
}

pub fn verdict(risk_level: RiskLevel, probability: f64) -> Verdict {
    Verdict {
        probability,
        risk_level,
        analysis: format!("scripted {risk_level} verdict"),
        recommendations: vec!["Do not reply".to_string()],
        sources: vec![],
    }
}

// ─── encoders ───────────────────────────────────────────────────────────────

/// Deterministic byte-histogram text encoder that counts calls.
pub struct CountingEncoder {
    dimensions: usize,
    calls: AtomicUsize,
}

impl CountingEncoder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IEncoder for CountingEncoder {
    async fn encode_text(&self, text: &str) -> ShieldResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut v = vec![0.0f32; self.dimensions];
        for b in text.bytes() {
            v[b as usize % self.dimensions] += 1.0;
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Image encoder returning a constant vector of `dimensions` components.
pub struct FixedImageEncoder {
    dimensions: usize,
    value: f32,
}

impl FixedImageEncoder {
    pub fn new(dimensions: usize, value: f32) -> Self {
        Self { dimensions, value }
    }
}

#[async_trait]
impl IEncoder for FixedImageEncoder {
    async fn encode_text(&self, _text: &str) -> ShieldResult<Vec<f32>> {
        Err(EmbeddingError::UnsupportedModality {
            provider: self.name().to_string(),
            modality: "text".to_string(),
        }
        .into())
    }

    async fn encode_image(&self, _image: &[u8]) -> ShieldResult<Vec<f32>> {
        Ok(vec![self.value; self.dimensions])
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "fixed-image"
    }
}

/// Encoder that always fails.
pub struct FailingEncoder;

#[async_trait]
impl IEncoder for FailingEncoder {
    async fn encode_text(&self, _text: &str) -> ShieldResult<Vec<f32>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "scripted failure".to_string(),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        1024
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Encoder whose calls never finish within any realistic deadline.
pub struct HangingEncoder {
    dimensions: usize,
}

impl HangingEncoder {
    const STALL: Duration = Duration::from_secs(24 * 60 * 60);

    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

#[async_trait]
impl IEncoder for HangingEncoder {
    async fn encode_text(&self, _text: &str) -> ShieldResult<Vec<f32>> {
        tokio::time::sleep(Self::STALL).await;
        Ok(vec![0.0; self.dimensions])
    }

    async fn encode_image(&self, _image: &[u8]) -> ShieldResult<Vec<f32>> {
        tokio::time::sleep(Self::STALL).await;
        Ok(vec![0.0; self.dimensions])
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hanging"
    }
}

// ─── extractor ──────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct Script {
    text: Option<String>,
    delay: Option<Duration>,
}

/// Extractor answering from a table keyed by the uploaded bytes.
///
/// Unscripted bytes fail, as does any entry registered with `with_failure`.
/// Images and audio share the table.
#[derive(Default)]
pub struct ScriptedExtractor {
    scripts: HashMap<Vec<u8>, Script>,
    calls: AtomicUsize,
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, bytes: &[u8], text: &str) -> Self {
        self.scripts.entry(bytes.to_vec()).or_default().text = Some(text.to_string());
        self
    }

    pub fn with_failure(mut self, bytes: &[u8]) -> Self {
        self.scripts.entry(bytes.to_vec()).or_default().text = None;
        self
    }

    pub fn with_delay(mut self, bytes: &[u8], delay: Duration) -> Self {
        self.scripts.entry(bytes.to_vec()).or_default().delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer(&self, bytes: &[u8]) -> ShieldResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let script = self.scripts.get(bytes).cloned().unwrap_or_default();
        if let Some(delay) = script.delay {
            tokio::time::sleep(delay).await;
        }
        script.text.ok_or_else(|| {
            ExtractionError::Failed {
                source_name: "scripted".to_string(),
                reason: "scripted failure".to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl IEvidenceExtractor for ScriptedExtractor {
    async fn extract_text(&self, image: &[u8], _mime_type: &str) -> ShieldResult<String> {
        self.answer(image).await
    }

    async fn transcribe(&self, audio: &[u8], _mime_type: &str) -> ShieldResult<String> {
        self.answer(audio).await
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

// ─── store ──────────────────────────────────────────────────────────────────

/// One recorded search call.
#[derive(Debug, Clone)]
pub struct SearchCall {
    pub collection: String,
    pub vector: Vec<f32>,
    pub k: usize,
    pub min_score: Option<f32>,
}

/// Store returning scripted hits per collection and recording every call.
///
/// Search applies `min_score` (inclusive) and `k` to the scripted hits, so
/// gating logic upstream sees what a real store would return.
#[derive(Default)]
pub struct RecordingStore {
    collections: Mutex<BTreeSet<String>>,
    results: HashMap<String, Vec<ScoredPoint>>,
    failing_search: HashSet<String>,
    slow_search: HashMap<String, Duration>,
    fail_upserts: bool,
    upsert_delay: Option<Duration>,
    upserts: Mutex<Vec<(String, Vec<Point>)>>,
    searches: Mutex<Vec<SearchCall>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, collection: &str, hits: Vec<ScoredPoint>) -> Self {
        self.results.insert(collection.to_string(), hits);
        self
    }

    pub fn failing_search(mut self, collection: &str) -> Self {
        self.failing_search.insert(collection.to_string());
        self
    }

    pub fn slow_search(mut self, collection: &str, delay: Duration) -> Self {
        self.slow_search.insert(collection.to_string(), delay);
        self
    }

    pub fn failing_upserts(mut self) -> Self {
        self.fail_upserts = true;
        self
    }

    pub fn slow_upserts(mut self, delay: Duration) -> Self {
        self.upsert_delay = Some(delay);
        self
    }

    /// Every successful upsert call, in order.
    pub fn upserts(&self) -> Vec<(String, Vec<Point>)> {
        self.upserts.lock().map(|u| u.clone()).unwrap_or_default()
    }

    /// All points upserted into `collection`.
    pub fn upserted_points(&self, collection: &str) -> Vec<Point> {
        self.upserts()
            .into_iter()
            .filter(|(c, _)| c == collection)
            .flat_map(|(_, points)| points)
            .collect()
    }

    pub fn searches(&self) -> Vec<SearchCall> {
        self.searches.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn created_collections(&self) -> BTreeSet<String> {
        self.collections.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl IKnowledgeStore for RecordingStore {
    async fn list_collections(&self) -> ShieldResult<BTreeSet<String>> {
        Ok(self.created_collections())
    }

    async fn create_collection(&self, spec: &CollectionSpec) -> ShieldResult<()> {
        if let Ok(mut c) = self.collections.lock() {
            c.insert(spec.name.clone());
        }
        Ok(())
    }

    async fn upsert(&self, collection: &str, points: Vec<Point>) -> ShieldResult<()> {
        if let Some(delay) = self.upsert_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_upserts {
            return Err(StoreError::RequestFailed {
                reason: "scripted upsert failure".to_string(),
            }
            .into());
        }
        if let Ok(mut u) = self.upserts.lock() {
            u.push((collection.to_string(), points));
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        k: usize,
        min_score: Option<f32>,
    ) -> ShieldResult<Vec<ScoredPoint>> {
        if let Ok(mut s) = self.searches.lock() {
            s.push(SearchCall {
                collection: collection.to_string(),
                vector: vector.to_vec(),
                k,
                min_score,
            });
        }
        if let Some(delay) = self.slow_search.get(collection) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing_search.contains(collection) {
            return Err(StoreError::RequestFailed {
                reason: format!("scripted search failure on {collection}"),
            }
            .into());
        }
        let mut hits: Vec<ScoredPoint> = self
            .results
            .get(collection)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|h| min_score.map_or(true, |min| h.score >= min))
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(k);
        Ok(hits)
    }

    fn name(&self) -> &str {
        "recording"
    }
}

// ─── reasoners ──────────────────────────────────────────────────────────────

/// Reasoner returning a fixed verdict, optionally after a delay.
pub struct ScriptedReasoner {
    name: String,
    verdict: Verdict,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, usize, String)>>,
}

impl ScriptedReasoner {
    pub fn new(name: &str, verdict: Verdict) -> Self {
        Self {
            name: name.to_string(),
            verdict,
            delay: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(evidence, case count, memory context)` of the last call.
    pub fn last_request(&self) -> Option<(String, usize, String)> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }
}

#[async_trait]
impl IReasoningProvider for ScriptedReasoner {
    async fn assess(&self, request: ReasoningRequest<'_>) -> ShieldResult<Verdict> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some((
                request.evidence.to_string(),
                request.cases.len(),
                request.memory_context.to_string(),
            ));
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.verdict.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Reasoner that judges from the retrieved cases alone.
///
/// The highest-scoring case decides: `scam` gives `High` with probability
/// `0.5 + score / 2`, anything else (or no case) gives `Low` with
/// probability `0.1`.
pub struct TopCaseReasoner {
    name: String,
}

impl TopCaseReasoner {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl IReasoningProvider for TopCaseReasoner {
    async fn assess(&self, request: ReasoningRequest<'_>) -> ShieldResult<Verdict> {
        let top = request
            .cases
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score));
        let (risk_level, probability) = match top {
            Some(case) if case.risk_label == "scam" => (
                RiskLevel::High,
                (0.5 + f64::from(case.score) / 2.0).clamp(0.0, 1.0),
            ),
            _ => (RiskLevel::Low, 0.1),
        };
        Ok(Verdict {
            probability,
            risk_level,
            analysis: format!(
                "closest known case is {}",
                top.map_or("none", |c| c.risk_label.as_str())
            ),
            recommendations: vec![],
            sources: top.map(|c| c.id.clone()).into_iter().collect(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Reasoner that always fails with a transport error.
pub struct FailingReasoner {
    name: String,
    calls: AtomicUsize,
}

impl FailingReasoner {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IReasoningProvider for FailingReasoner {
    async fn assess(&self, _request: ReasoningRequest<'_>) -> ShieldResult<Verdict> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ReasoningError::RequestFailed {
            provider: self.name.clone(),
            reason: "scripted outage".to_string(),
        }
        .into())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Empty payload, for tests that only care about scores.
pub fn empty_payload() -> Payload {
    Payload::new()
}
