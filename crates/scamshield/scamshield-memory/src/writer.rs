//! MemoryWriter: builds one record per verdict and upserts it in the background.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use scamshield_core::config::MemoryConfig;
use scamshield_core::models::{CollectionSpec, FusedEvidence, MemoryRecord, Verdict};
use scamshield_core::text::char_prefix;
use scamshield_core::traits::IKnowledgeStore;
use scamshield_observability::tracing_setup::events;
use tokio_util::task::TaskTracker;
use tracing::debug;
use uuid::Uuid;

pub struct MemoryWriter {
    store: Arc<dyn IKnowledgeStore>,
    collection: CollectionSpec,
    tracker: TaskTracker,
    config: MemoryConfig,
}

impl MemoryWriter {
    pub fn new(
        store: Arc<dyn IKnowledgeStore>,
        collection: CollectionSpec,
        config: MemoryConfig,
    ) -> Self {
        Self {
            store,
            collection,
            tracker: TaskTracker::new(),
            config,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection.name
    }

    /// Writes spawned but not yet finished.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Build the record for one analysed submission. The id is always fresh.
    pub fn build_record(
        &self,
        fused: &FusedEvidence,
        vector: Vec<f32>,
        verdict: &Verdict,
    ) -> MemoryRecord {
        let document = fused.render();
        MemoryRecord {
            id: Uuid::new_v4(),
            vector,
            timestamp: Utc::now(),
            original_input: char_prefix(&document, self.config.excerpt_chars).to_string(),
            verdict_summary: verdict.summary(),
            recommendations: verdict.recommendations.clone(),
            risk_level: verdict.risk_level,
            probability: verdict.probability,
            content_hash: blake3::hash(document.as_bytes()).to_hex().to_string(),
        }
    }

    /// Upsert one record, bounded by the persist timeout.
    ///
    /// Returns whether the write landed. Failures are logged, never raised.
    pub async fn persist(&self, record: MemoryRecord) -> bool {
        persist_record(
            self.store.clone(),
            self.collection.name.clone(),
            record,
            Duration::from_secs(self.config.persist_timeout_secs),
        )
        .await
    }

    /// Build and persist in the background.
    ///
    /// Returns the new record's id, or `None` when there is nothing to
    /// persist (empty document, or memory disabled). The write is tracked
    /// so [`MemoryWriter::shutdown`] can wait for it.
    pub fn spawn_persist(
        &self,
        fused: &FusedEvidence,
        vector: Vec<f32>,
        verdict: &Verdict,
    ) -> Option<Uuid> {
        if !self.config.enabled {
            debug!("memory disabled; submission not persisted");
            return None;
        }
        if fused.is_empty() {
            return None;
        }
        if self.tracker.is_closed() {
            debug!("memory writer shut down; submission not persisted");
            return None;
        }

        let record = self.build_record(fused, vector, verdict);
        let id = record.id;
        self.tracker.spawn(persist_record(
            self.store.clone(),
            self.collection.name.clone(),
            record,
            Duration::from_secs(self.config.persist_timeout_secs),
        ));
        Some(id)
    }

    /// Stop accepting writes and wait for every in-flight one.
    pub async fn shutdown(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}

async fn persist_record(
    store: Arc<dyn IKnowledgeStore>,
    collection: String,
    record: MemoryRecord,
    timeout: Duration,
) -> bool {
    let id = record.id.to_string();
    match tokio::time::timeout(timeout, store.upsert(&collection, vec![record.into_point()])).await
    {
        Ok(Ok(())) => {
            events::memory_persisted(&id, &collection);
            true
        }
        Ok(Err(e)) => {
            events::memory_persist_failed(&id, &e.to_string());
            false
        }
        Err(_) => {
            events::memory_persist_failed(&id, &format!("timed out after {timeout:?}"));
            false
        }
    }
}
