//! RetrievalCoordinator: concurrent dual-tier similarity search.
//!
//! Public tier: top `case_top_k` from the case corpus, no score gate.
//! Private tier: top `memory_top_k` from the memory collection, keeping
//! only matches with `score >= memory_threshold`.
//!
//! The query vector is padded separately to each tier's declared
//! dimensionality. Each tier runs under its own timeout; a failed tier
//! yields no matches and a [`DegradationEvent`], never an error.

use std::sync::Arc;
use std::time::Duration;

use scamshield_core::config::RetrievalConfig;
use scamshield_core::errors::{RetrievalError, ShieldResult};
use scamshield_core::models::{
    CaseMatch, CollectionSpec, DegradationEvent, SimilarityMatch, Tier,
};
use scamshield_core::traits::IKnowledgeStore;
use scamshield_embeddings::padding;
use scamshield_observability::retrieval_span;
use scamshield_observability::tracing_setup::events;
use tracing::{warn, Instrument};

use crate::memory_context;
use crate::schema::PayloadSchema;

/// Matches from both tiers plus any tier failures.
#[derive(Debug, Default)]
pub struct RetrievalOutcome {
    /// Public matches, best first.
    pub public: Vec<SimilarityMatch>,
    /// Private matches that passed the gate, best first.
    pub private: Vec<SimilarityMatch>,
    pub degradations: Vec<DegradationEvent>,
}

impl RetrievalOutcome {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

pub struct RetrievalCoordinator {
    store: Arc<dyn IKnowledgeStore>,
    public: CollectionSpec,
    private: CollectionSpec,
    config: RetrievalConfig,
    schema: PayloadSchema,
}

impl RetrievalCoordinator {
    pub fn new(
        store: Arc<dyn IKnowledgeStore>,
        public: CollectionSpec,
        private: CollectionSpec,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            store,
            public,
            private,
            config,
            schema: PayloadSchema::default(),
        }
    }

    pub fn public_collection(&self) -> &CollectionSpec {
        &self.public
    }

    pub fn private_collection(&self) -> &CollectionSpec {
        &self.private
    }

    /// Search both tiers concurrently.
    pub async fn retrieve(&self, query: &[f32]) -> RetrievalOutcome {
        let threshold = self.config.memory_threshold;
        let (public, private) = tokio::join!(
            self.search_tier(Tier::Public, &self.public, query, self.config.case_top_k, None),
            self.search_tier(
                Tier::Private,
                &self.private,
                query,
                self.config.memory_top_k,
                Some(threshold),
            ),
        );

        let mut outcome = RetrievalOutcome::default();
        match public {
            Ok(matches) => outcome.public = matches,
            Err(e) => outcome.degradations.push(self.tier_failed(Tier::Public, &e.to_string())),
        }
        let memory_candidates = match private {
            Ok(matches) => {
                let candidates = matches.len();
                // Enforce the gate locally as well; remote stores may treat
                // the threshold loosely.
                outcome.private = matches.into_iter().filter(|m| m.score >= threshold).collect();
                candidates
            }
            Err(e) => {
                outcome
                    .degradations
                    .push(self.tier_failed(Tier::Private, &e.to_string()));
                0
            }
        };

        events::retrieval_completed(outcome.public.len(), memory_candidates, outcome.private.len());
        outcome
    }

    async fn search_tier(
        &self,
        tier: Tier,
        collection: &CollectionSpec,
        query: &[f32],
        k: usize,
        min_score: Option<f32>,
    ) -> ShieldResult<Vec<SimilarityMatch>> {
        let vector = padding::pad_to(query, collection.dimensions)?;
        let timeout = Duration::from_secs(self.config.search_timeout_secs);
        let search = self
            .store
            .search(&collection.name, &vector, k, min_score)
            .instrument(retrieval_span!(tier, collection.name));

        let points = tokio::time::timeout(timeout, search)
            .await
            .map_err(|_| RetrievalError::TierTimeout {
                tier: tier.to_string(),
                timeout_secs: self.config.search_timeout_secs,
            })??;

        Ok(points
            .into_iter()
            .map(|p| SimilarityMatch::from_point(p, tier))
            .collect())
    }

    fn tier_failed(&self, tier: Tier, reason: &str) -> DegradationEvent {
        let err = RetrievalError::TierFailed {
            tier: tier.to_string(),
            reason: reason.to_string(),
        };
        warn!(tier = %tier, error = %err, "retrieval tier degraded to empty");
        DegradationEvent::now(format!("retrieval.{tier}"), reason, "empty")
    }

    /// Reasoning-ready views of the public matches.
    pub fn case_matches(&self, outcome: &RetrievalOutcome) -> Vec<CaseMatch> {
        outcome
            .public
            .iter()
            .map(|m| self.schema.case_match(m))
            .collect()
    }

    /// Digest of the gated memory matches.
    pub fn memory_context(&self, outcome: &RetrievalOutcome) -> String {
        memory_context::render(&outcome.private)
    }
}
