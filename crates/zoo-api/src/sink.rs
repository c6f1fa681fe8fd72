//! Event sink abstraction.
//!
//! Handlers hand every event an interaction produced to an [`EventSink`].
//! Publishing is fire-and-forget: a sink never reports failure back to the
//! request, it logs and moves on.

use std::sync::{Mutex, PoisonError};

use zoo_types::PetEvent;

/// Destination for pet events.
pub trait EventSink: Send + Sync {
    /// Publish one event. Must not block the caller.
    fn publish(&self, event: &PetEvent);
}

/// A sink that drops every event.
pub struct NoopSink;

impl EventSink for NoopSink {
    fn publish(&self, event: &PetEvent) {
        tracing::trace!(subject = %event.subject(), "event dropped (no sink)");
    }
}

/// A sink that keeps every event in memory, for tests and local runs.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PetEvent>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, oldest first.
    pub fn events(&self) -> Vec<PetEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: &PetEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
