//! Interaction counters.
//!
//! [`InteractionStats`] is the service's [`InteractionObserver`]: it logs
//! each interaction through `tracing` and keeps running totals that
//! `GET /pet/stats` reports.

use std::sync::atomic::{AtomicU64, Ordering};

use zoo_engine::{InteractionObserver, Outcome};
use zoo_types::{PetEvent, PetId};

/// Running totals since process start.
#[derive(Debug, Default)]
pub struct InteractionStats {
    interactions: AtomicU64,
    ignored: AtomicU64,
    rejected: AtomicU64,
    evolutions: AtomicU64,
    events: AtomicU64,
}

/// Point-in-time copy of [`InteractionStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Accepted actions, including ignored ones.
    pub interactions: u64,
    /// Actions swallowed by a sleep guard.
    pub ignored: u64,
    /// Invalid actions.
    pub rejected: u64,
    /// Evolution events.
    pub evolutions: u64,
    /// Events handed to the sink.
    pub events: u64,
}

impl InteractionStats {
    /// Fresh counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every counter.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            interactions: self.interactions.load(Ordering::Relaxed),
            ignored: self.ignored.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            evolutions: self.evolutions.load(Ordering::Relaxed),
            events: self.events.load(Ordering::Relaxed),
        }
    }
}

impl InteractionObserver for InteractionStats {
    fn on_outcome(&self, pet_id: &PetId, outcome: &Outcome) {
        self.interactions.fetch_add(1, Ordering::Relaxed);
        if outcome.ignored {
            self.ignored.fetch_add(1, Ordering::Relaxed);
        }
        if outcome.evolved() {
            self.evolutions.fetch_add(1, Ordering::Relaxed);
        }
        tracing::info!(
            %pet_id,
            action = %outcome.action,
            mood = %outcome.state.mood,
            ignored = outcome.ignored,
            events = outcome.events.len(),
            "interaction"
        );
    }

    fn on_rejected(&self, pet_id: &PetId, action: &str) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(%pet_id, action, "rejected invalid action");
    }

    fn on_event(&self, event: &PetEvent) {
        self.events.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(subject = %event.subject(), "event published");
    }
}
