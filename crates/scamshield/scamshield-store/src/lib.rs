//! # scamshield-store
//!
//! Two implementations of `IKnowledgeStore`:
//!
//! - [`QdrantStore`]: REST client for a managed Qdrant cluster (cloud mode).
//! - [`InMemoryStore`]: exact cosine search in process, persisted as a JSON
//!   snapshot between runs (local mode).
//!
//! [`StoreBackend`] picks one from configuration and owns the
//! load/persist lifecycle.

pub mod bootstrap;
pub mod memory_store;
pub mod qdrant;

use std::path::PathBuf;
use std::sync::Arc;

use scamshield_core::config::StoreConfig;
use scamshield_core::errors::ShieldResult;
use scamshield_core::traits::IKnowledgeStore;
use tracing::info;

pub use bootstrap::ensure_collection;
pub use memory_store::{cosine_similarity, InMemoryStore};
pub use qdrant::QdrantStore;

/// The configured store plus whatever lifecycle it needs.
#[derive(Clone)]
pub enum StoreBackend {
    Cloud(Arc<QdrantStore>),
    Local {
        store: Arc<InMemoryStore>,
        snapshot: Option<PathBuf>,
    },
    /// An injected store the engine doesn't manage.
    External(Arc<dyn IKnowledgeStore>),
}

impl StoreBackend {
    pub fn from_config(config: &StoreConfig) -> ShieldResult<Self> {
        if config.use_cloud {
            let store = QdrantStore::from_config(config)?;
            info!(url = store.base_url(), "using Qdrant cloud store");
            Ok(Self::Cloud(Arc::new(store)))
        } else {
            info!(path = %config.local_path, "using local in-process store");
            Ok(Self::Local {
                store: Arc::new(InMemoryStore::new()),
                snapshot: Some(PathBuf::from(&config.local_path)),
            })
        }
    }

    pub fn store(&self) -> Arc<dyn IKnowledgeStore> {
        match self {
            Self::Cloud(s) => s.clone(),
            Self::Local { store, .. } => store.clone(),
            Self::External(s) => s.clone(),
        }
    }

    /// Load the local snapshot if one exists. No-op for other backends.
    pub fn load(&self) -> ShieldResult<()> {
        if let Self::Local {
            store,
            snapshot: Some(path),
        } = self
        {
            if path.exists() {
                let points = store.load_snapshot(path)?;
                info!(path = %path.display(), points, "local store snapshot loaded");
            }
        }
        Ok(())
    }

    /// Write the local snapshot. No-op for other backends.
    pub fn persist(&self) -> ShieldResult<()> {
        if let Self::Local {
            store,
            snapshot: Some(path),
        } = self
        {
            store.save_snapshot(path)?;
            info!(path = %path.display(), "local store snapshot saved");
        }
        Ok(())
    }
}
