//! In-process knowledge store.
//!
//! Exact cosine search over every point of a collection. Good for the
//! corpus sizes local mode deals with; no index structure.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use scamshield_core::errors::{ShieldResult, StoreError};
use scamshield_core::models::{CollectionSpec, Point, ScoredPoint};
use scamshield_core::traits::IKnowledgeStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Collection {
    spec: CollectionSpec,
    /// Keyed by point id; upserting an existing id replaces it.
    points: BTreeMap<String, Point>,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    collections: Vec<Collection>,
}

/// Cosine similarity. Zero-norm vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom <= f32::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point_count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|c| c.get(collection).map_or(0, |c| c.points.len()))
            .unwrap_or(0)
    }

    pub fn get_point(&self, collection: &str, id: &str) -> Option<Point> {
        let guard = self.collections.read().ok()?;
        guard.get(collection)?.points.get(id).cloned()
    }

    /// Replace the store contents with a JSON snapshot. Returns the number
    /// of points loaded.
    pub fn load_snapshot(&self, path: &Path) -> ShieldResult<usize> {
        let raw = std::fs::read_to_string(path).map_err(|e| StoreError::Snapshot {
            reason: format!("read {}: {e}", path.display()),
        })?;
        let snapshot: Snapshot = serde_json::from_str(&raw).map_err(|e| StoreError::Snapshot {
            reason: format!("parse {}: {e}", path.display()),
        })?;

        let loaded: usize = snapshot.collections.iter().map(|c| c.points.len()).sum();
        let mut guard = self.write()?;
        guard.clear();
        for collection in snapshot.collections {
            guard.insert(collection.spec.name.clone(), collection);
        }
        Ok(loaded)
    }

    /// Write every collection to `path`, via a sibling temp file and rename.
    pub fn save_snapshot(&self, path: &Path) -> ShieldResult<()> {
        let snapshot = {
            let guard = self.read()?;
            let mut collections: Vec<Collection> = guard.values().cloned().collect();
            collections.sort_by(|a, b| a.spec.name.cmp(&b.spec.name));
            Snapshot { collections }
        };
        let json = serde_json::to_string(&snapshot)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Snapshot {
                reason: format!("create {}: {e}", parent.display()),
            })?;
        }
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| StoreError::Snapshot {
            reason: format!("write {}: {e}", tmp.display()),
        })?;
        std::fs::rename(&tmp, path).map_err(|e| StoreError::Snapshot {
            reason: format!("rename to {}: {e}", path.display()),
        })?;
        Ok(())
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Collection>>, StoreError> {
        self.collections.read().map_err(|_| StoreError::RequestFailed {
            reason: "store lock poisoned".to_string(),
        })
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Collection>>, StoreError> {
        self.collections.write().map_err(|_| StoreError::RequestFailed {
            reason: "store lock poisoned".to_string(),
        })
    }
}

#[async_trait]
impl IKnowledgeStore for InMemoryStore {
    async fn list_collections(&self) -> ShieldResult<BTreeSet<String>> {
        Ok(self.read()?.keys().cloned().collect())
    }

    async fn create_collection(&self, spec: &CollectionSpec) -> ShieldResult<()> {
        let mut guard = self.write()?;
        guard
            .entry(spec.name.clone())
            .or_insert_with(|| Collection {
                spec: spec.clone(),
                points: BTreeMap::new(),
            });
        Ok(())
    }

    async fn upsert(&self, collection: &str, points: Vec<Point>) -> ShieldResult<()> {
        let mut guard = self.write()?;
        let target = guard
            .get_mut(collection)
            .ok_or_else(|| StoreError::CollectionNotFound {
                name: collection.to_string(),
            })?;
        let dims = target.spec.dimensions;
        if let Some(bad) = points.iter().find(|p| p.vector.len() != dims) {
            return Err(StoreError::DimensionMismatch {
                collection: collection.to_string(),
                expected: dims,
                actual: bad.vector.len(),
            }
            .into());
        }
        for point in points {
            target.points.insert(point.id.clone(), point);
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
        let guard = self.read()?;
        let target = guard
            .get(collection)
            .ok_or_else(|| StoreError::CollectionNotFound {
                name: collection.to_string(),
            })?;
        if vector.len() != target.spec.dimensions {
            return Err(StoreError::DimensionMismatch {
                collection: collection.to_string(),
                expected: target.spec.dimensions,
                actual: vector.len(),
            }
            .into());
        }

        let mut scored: Vec<ScoredPoint> = target
            .points
            .values()
            .map(|p| ScoredPoint {
                id: p.id.clone(),
                score: cosine_similarity(vector, &p.vector),
                payload: p.payload.clone(),
            })
            .filter(|p| min_score.map_or(true, |min| p.score >= min))
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        Ok(scored)
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_parallel_and_orthogonal() {
        assert!((cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn zero_padding_does_not_change_cosine() {
        let a = [0.3, -0.2, 0.9];
        let b = [0.1, 0.5, 0.4];
        let a_pad = [0.3, -0.2, 0.9, 0.0, 0.0];
        let b_pad = [0.1, 0.5, 0.4, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - cosine_similarity(&a_pad, &b_pad)).abs() < 1e-6);
    }
}
