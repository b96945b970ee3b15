//! RiskEngine: owns every stage handle and runs one analysis per call.
//!
//! Handles are injected at construction and shared read-only across
//! concurrent requests. The only mutable state is the degradation tracker,
//! locked briefly and never across an await.

use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::future::join_all;
use scamshield_core::config::ShieldConfig;
use scamshield_core::errors::{EmbeddingError, ShieldError, ShieldResult};
use scamshield_core::models::{
    AnalysisResponse, CollectionSpec, DegradationEvent, DetailedEvidence, EvidenceContent,
    EvidenceItem, Modality, RiskLevel, VisualFinding, VisualRisk,
};
use scamshield_core::traits::{IEvidenceExtractor, IKnowledgeStore, ReasoningRequest};
use scamshield_embeddings::EmbeddingGateway;
use scamshield_evidence::{create_extractor, fuse, EvidenceExtraction, EvidenceUpload};
use scamshield_memory::MemoryWriter;
use scamshield_observability::{analysis_span, embedding_span, DegradationTracker, TrackedDegradation};
use scamshield_reasoning::{VerdictDispatcher, VerdictSource};
use scamshield_retrieval::{RetrievalCoordinator, RetrievalOutcome, VisualMatcher};
use scamshield_store::{ensure_collection, StoreBackend};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use crate::ingest::CorpusIngestor;

/// Load `.env` (if present) and then the layered configuration.
pub fn load_config(path: Option<&Path>) -> ShieldResult<ShieldConfig> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            warn!(error = %e, "ignoring unreadable .env file");
        }
    }
    ShieldConfig::load(path)
}

pub struct RiskEngine {
    config: ShieldConfig,
    gateway: Arc<EmbeddingGateway>,
    extraction: EvidenceExtraction,
    backend: StoreBackend,
    coordinator: RetrievalCoordinator,
    visual: VisualMatcher,
    dispatcher: VerdictDispatcher,
    writer: MemoryWriter,
    degradation: Mutex<DegradationTracker>,
}

impl RiskEngine {
    /// Wire the engine from explicit handles.
    pub fn new(
        config: ShieldConfig,
        gateway: EmbeddingGateway,
        extractor: Arc<dyn IEvidenceExtractor>,
        backend: StoreBackend,
        dispatcher: VerdictDispatcher,
    ) -> Self {
        let store = backend.store();
        let public = CollectionSpec::cosine(&config.store.case_collection, config.store.dimensions);
        let private =
            CollectionSpec::cosine(&config.store.memory_collection, config.store.dimensions);
        let search_timeout = Duration::from_secs(config.retrieval.search_timeout_secs);

        let coordinator = RetrievalCoordinator::new(
            store.clone(),
            public.clone(),
            private.clone(),
            config.retrieval.clone(),
        );
        let visual = VisualMatcher::new(
            store.clone(),
            public,
            config.retrieval.visual_scam_threshold,
            search_timeout,
        );
        let writer = MemoryWriter::new(store, private, config.memory.clone());
        let extraction = EvidenceExtraction::new(
            extractor,
            Duration::from_secs(config.extraction.timeout_secs),
        );

        info!(
            store = backend.store().name(),
            text_encoder = gateway.text_encoder_name(),
            reasoning = ?dispatcher.provider_names(),
            dimensions = config.store.dimensions,
            "RiskEngine initialized"
        );

        Self {
            config,
            gateway: Arc::new(gateway),
            extraction,
            backend,
            coordinator,
            visual,
            dispatcher,
            writer,
            degradation: Mutex::new(DegradationTracker::new()),
        }
    }

    /// Build every handle from configuration.
    pub fn from_config(config: ShieldConfig) -> ShieldResult<Self> {
        let gateway = EmbeddingGateway::from_config(&config.embedding)?;
        let extractor = create_extractor(
            &config.extraction,
            config.reasoning.google_api_key.as_deref(),
        );
        let backend = StoreBackend::from_config(&config.store)?;
        let dispatcher = VerdictDispatcher::from_config(&config.reasoning);
        Ok(Self::new(config, gateway, extractor, backend, dispatcher))
    }

    /// Load the local snapshot and make sure both collections exist.
    pub async fn init(&self) -> ShieldResult<()> {
        self.backend.load()?;
        let store = self.backend.store();
        for spec in [
            self.coordinator.public_collection(),
            self.coordinator.private_collection(),
        ] {
            if ensure_collection(store.as_ref(), spec).await? {
                info!(collection = %spec.name, dims = spec.dimensions, "collection created");
            }
        }
        Ok(())
    }

    /// Wait for in-flight memory writes, then save the local snapshot.
    pub async fn shutdown(&self) -> ShieldResult<()> {
        self.writer.shutdown().await;
        self.backend.persist()
    }

    pub fn config(&self) -> &ShieldConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn IKnowledgeStore> {
        self.backend.store()
    }

    pub fn degradations(&self) -> Vec<TrackedDegradation> {
        self.tracker().events()
    }

    /// Ingestion handle over the case collection.
    pub fn ingestor(&self) -> CorpusIngestor {
        CorpusIngestor::new(
            self.gateway.clone(),
            self.backend.store(),
            self.coordinator.public_collection().clone(),
            self.config.store.ingest_batch_size,
        )
    }

    /// Analyse one submission.
    ///
    /// # Errors
    /// `EmptyEvidence` (client class) when no upload yields text;
    /// `Cancelled` when `cancel` fires before the verdict is produced.
    pub async fn analyze(
        &self,
        uploads: Vec<EvidenceUpload>,
        cancel: &CancellationToken,
    ) -> ShieldResult<AnalysisResponse> {
        let span = analysis_span!(Uuid::new_v4(), uploads.len());
        self.run(uploads, cancel).instrument(span).await
    }

    async fn run(
        &self,
        uploads: Vec<EvidenceUpload>,
        cancel: &CancellationToken,
    ) -> ShieldResult<AnalysisResponse> {
        if cancel.is_cancelled() {
            return Err(ShieldError::Cancelled);
        }

        let report = self.extraction.extract_all(uploads).await;
        let (items, visual_analysis) = self.match_images(report.items).await;
        let fused = fuse(&items, report.submitted, self.config.retrieval.query_char_cap)?;
        debug!(
            fragments = fused.inputs_processed(),
            dropped = report.failures.len(),
            "evidence fused"
        );

        let vector = self.embed_query(&fused.truncated_query).await;
        let outcome = match &vector {
            Some(v) => self.coordinator.retrieve(v).await,
            None => RetrievalOutcome::default(),
        };
        self.record(outcome.degradations.iter().cloned());

        let cases = self.coordinator.case_matches(&outcome);
        let memory_context = self.coordinator.memory_context(&outcome);
        let evidence = fused.render();
        let request = ReasoningRequest {
            evidence: &evidence,
            cases: &cases,
            memory_context: &memory_context,
        };
        let dispatched = self.dispatcher.dispatch(request, cancel).await?;
        self.record(dispatched.degradations.iter().cloned());
        if let VerdictSource::Provider(name) = &dispatched.source {
            self.tracker().mark_recovered(&format!("reasoning.{name}"));
        }

        if cancel.is_cancelled() {
            debug!("request cancelled after verdict; memory write skipped");
        } else if let Some(vector) = vector {
            if let Some(id) = self.writer.spawn_persist(&fused, vector, &dispatched.verdict) {
                debug!(record_id = %id, "memory write scheduled");
            }
        }

        Ok(AnalysisResponse {
            inputs_processed: fused.inputs_processed(),
            final_verdict: dispatched.verdict,
            detailed_evidence: DetailedEvidence {
                visual_analysis,
                text_matches: cases,
                aggregated_text: evidence,
                memory_context,
            },
        })
    }

    /// Embed the bounded query at the collections' dimensionality.
    ///
    /// A failure degrades the request to no retrieval and no memory write.
    async fn embed_query(&self, query: &str) -> Option<Vec<f32>> {
        let dims = self.config.store.dimensions;
        let span = embedding_span!(self.gateway.text_encoder_name(), dims);
        let encoding = self.gateway.encode_query(query, dims).instrument(span);
        match self.within_embedding_deadline(encoding).await {
            Ok(v) => {
                self.tracker().mark_recovered("embedding.text");
                Some(v)
            }
            Err(e) => {
                self.record([DegradationEvent::now(
                    "embedding.text",
                    e.to_string(),
                    "no retrieval",
                )]);
                None
            }
        }
    }

    /// Attach a visual finding to every image when an image encoder is wired in.
    async fn match_images(
        &self,
        items: Vec<EvidenceItem>,
    ) -> (Vec<EvidenceItem>, Vec<VisualFinding>) {
        if !self.gateway.has_image_encoder() {
            return (items, Vec::new());
        }

        let risks = join_all(items.iter().map(|item| self.assess_image(item))).await;
        let mut findings = Vec::new();
        let items = items
            .into_iter()
            .zip(risks)
            .map(|(item, risk)| match risk {
                Some(risk) => {
                    let annotated = if risk.risk_level == RiskLevel::Unknown {
                        item
                    } else {
                        let line = risk.finding_line();
                        item.with_visual_finding(line)
                    };
                    findings.push(VisualFinding {
                        filename: annotated.source_name.clone(),
                        visual_risk: risk,
                    });
                    annotated
                }
                None => item,
            })
            .collect();
        (items, findings)
    }

    async fn assess_image(&self, item: &EvidenceItem) -> Option<VisualRisk> {
        if item.modality != Modality::Image {
            return None;
        }
        let EvidenceContent::Bytes(bytes) = &item.content else {
            return None;
        };
        let dims = self.coordinator.public_collection().dimensions;
        match self
            .within_embedding_deadline(self.gateway.encode_image(bytes, dims))
            .await
        {
            Ok(vector) => Some(self.visual.assess(&vector).await),
            Err(e) => {
                self.record([DegradationEvent::now(
                    "embedding.image",
                    e.to_string(),
                    "no visual finding",
                )]);
                None
            }
        }
    }

    /// Bound an encoder call by `embedding.timeout_secs`.
    async fn within_embedding_deadline(
        &self,
        encoding: impl Future<Output = ShieldResult<Vec<f32>>>,
    ) -> ShieldResult<Vec<f32>> {
        let seconds = self.config.embedding.timeout_secs.max(1);
        tokio::time::timeout(Duration::from_secs(seconds), encoding)
            .await
            .unwrap_or_else(|_| Err(EmbeddingError::TimedOut { seconds }.into()))
    }

    fn record(&self, events: impl IntoIterator<Item = DegradationEvent>) {
        let mut tracker = self.tracker();
        for event in events {
            tracker.record(event);
        }
    }

    fn tracker(&self) -> std::sync::MutexGuard<'_, DegradationTracker> {
        self.degradation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
