use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::errors::ShieldResult;
use crate::models::{CollectionSpec, Point, ScoredPoint};

/// Similarity-searchable vector store holding the case corpus and the
/// memory collection. The engine is a pure client of it.
#[async_trait]
pub trait IKnowledgeStore: Send + Sync {
    async fn list_collections(&self) -> ShieldResult<BTreeSet<String>>;

    async fn create_collection(&self, spec: &CollectionSpec) -> ShieldResult<()>;

    /// Insert or replace points by id.
    async fn upsert(&self, collection: &str, points: Vec<Point>) -> ShieldResult<()>;

    /// Top-`k` points by cosine similarity, best first. With `min_score`,
    /// points scoring below it are omitted.
    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        k: usize,
        min_score: Option<f32>,
    ) -> ShieldResult<Vec<ScoredPoint>>;

    fn name(&self) -> &str;
}
