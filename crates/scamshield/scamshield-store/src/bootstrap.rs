use scamshield_core::errors::ShieldResult;
use scamshield_core::models::CollectionSpec;
use scamshield_core::traits::IKnowledgeStore;
use tracing::info;

/// Create `spec` if the store doesn't list it yet. Returns `true` if created.
pub async fn ensure_collection(
    store: &dyn IKnowledgeStore,
    spec: &CollectionSpec,
) -> ShieldResult<bool> {
    let existing = store.list_collections().await?;
    if existing.contains(&spec.name) {
        return Ok(false);
    }
    store.create_collection(spec).await?;
    info!(
        collection = %spec.name,
        dims = spec.dimensions,
        distance = spec.distance.as_str(),
        store = store.name(),
        "collection created"
    );
    Ok(true)
}
