//! Interaction observer.
//!
//! The engine keeps no counters of its own. Callers that want telemetry
//! implement [`InteractionObserver`] and invoke it around
//! [`apply_action`](crate::interaction::apply_action).

use zoo_types::{PetEvent, PetId};

use crate::interaction::Outcome;

/// Hook invoked by the caller after each interaction attempt.
pub trait InteractionObserver: Send + Sync {
    /// An action was accepted (applied or ignored by a sleep guard).
    fn on_outcome(&self, pet_id: &PetId, outcome: &Outcome);

    /// An action was rejected as invalid.
    fn on_rejected(&self, pet_id: &PetId, action: &str);

    /// An event was handed to the sink.
    fn on_event(&self, event: &PetEvent) {
        let _ = event;
    }
}

/// An observer that does nothing.
pub struct NoOpObserver;

impl InteractionObserver for NoOpObserver {
    fn on_outcome(&self, _pet_id: &PetId, _outcome: &Outcome) {}

    fn on_rejected(&self, _pet_id: &PetId, _action: &str) {}
}
