//! Structured log events for key pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log an evidence item that was excluded from the fused document.
pub fn extraction_failed(source_name: &str, modality: &str, reason: &str) {
    tracing::warn!(
        event = "extraction_failed",
        source = %source_name,
        modality = %modality,
        reason = %reason,
        "evidence item excluded"
    );
}

/// Log a completed dual-tier retrieval.
pub fn retrieval_completed(case_matches: usize, memory_candidates: usize, memory_gated: usize) {
    tracing::info!(
        event = "retrieval_completed",
        case_matches = case_matches,
        memory_candidates = memory_candidates,
        memory_gated = memory_gated,
        "retrieval completed"
    );
}

/// Log which path produced the verdict.
pub fn verdict_produced(source: &str, risk_level: &str, probability: f64) {
    tracing::info!(
        event = "verdict_produced",
        source = %source,
        risk_level = %risk_level,
        probability = probability,
        "verdict produced"
    );
}

/// Log a persisted memory record.
pub fn memory_persisted(record_id: &str, collection: &str) {
    tracing::info!(
        event = "memory_persisted",
        record_id = %record_id,
        collection = %collection,
        "memory record persisted"
    );
}

/// Log a memory write that failed. The response is unaffected.
pub fn memory_persist_failed(record_id: &str, reason: &str) {
    tracing::warn!(
        event = "memory_persist_failed",
        record_id = %record_id,
        reason = %reason,
        "memory record not persisted"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}
