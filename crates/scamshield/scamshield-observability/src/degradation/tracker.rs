//! Bounded log of component failures and the fallbacks that covered them.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use scamshield_core::models::DegradationEvent;
use serde::{Deserialize, Serialize};

const DEFAULT_MAX_EVENTS: usize = 10_000;

/// Whether the component behind a logged event is still failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    Active,
    Recovered,
}

/// One degradation entry plus its recovery state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

impl TrackedDegradation {
    fn open(event: DegradationEvent) -> Self {
        Self {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.recovery_status == RecoveryStatus::Active
    }

    fn concerns(&self, component: &str) -> bool {
        self.event.component == component
    }
}

/// Degradations seen by this process, oldest first.
///
/// Holds at most `max_events` entries; recording past the limit evicts
/// from the front.
#[derive(Debug, Clone)]
pub struct DegradationTracker {
    log: VecDeque<TrackedDegradation>,
    max_events: usize,
}

impl Default for DegradationTracker {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_EVENTS)
    }
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(max_events: usize) -> Self {
        Self {
            log: VecDeque::new(),
            max_events: max_events.max(1),
        }
    }

    /// Log the event and emit `degradation_triggered`.
    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::degradation_triggered(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        while self.log.len() >= self.max_events {
            self.log.pop_front();
        }
        self.log.push_back(TrackedDegradation::open(event));
    }

    /// Close every open entry for `component`. Returns how many were closed.
    pub fn mark_recovered(&mut self, component: &str) -> usize {
        let now = Utc::now();
        let mut closed = 0;
        for entry in self
            .log
            .iter_mut()
            .filter(|e| e.is_active() && e.concerns(component))
        {
            entry.recovery_status = RecoveryStatus::Recovered;
            entry.recovered_at = Some(now);
            closed += 1;
        }
        closed
    }

    /// Copy of the whole log, oldest first.
    pub fn events(&self) -> Vec<TrackedDegradation> {
        self.log.iter().cloned().collect()
    }
}
