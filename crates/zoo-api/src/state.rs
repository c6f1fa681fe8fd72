//! Shared application state for the pet API.
//!
//! [`AppState`] owns everything a request needs: the state store, the event
//! sink, the interaction observer and the per-pet locks that serialise
//! read-modify-write within this process.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::{Mutex, OwnedMutexGuard};
use zoo_engine::{
    FollowUpDelays, InteractionObserver, RngSource, apply_global_event, initial_state,
};
use zoo_store::{StateStore, StoreError};
use zoo_types::{PetId, PetState, Species};

use crate::sink::{EventSink, NoopSink};
use crate::stats::InteractionStats;

/// A fresh random source for one request or task.
///
/// Seeded from the thread generator so it can be held across `.await`.
pub fn dice() -> RngSource<SmallRng> {
    RngSource::new(SmallRng::from_rng(&mut rand::rng()))
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
pub struct AppState {
    /// Snapshot storage.
    pub store: StateStore,
    /// The pet this service hosts.
    pub pet_id: PetId,
    /// Its species.
    pub species: Species,
    /// Where events go.
    pub sink: Arc<dyn EventSink>,
    /// Counters reported by `GET /pet/stats`.
    pub stats: Arc<InteractionStats>,
    /// Told about every interaction attempt. Defaults to [`Self::stats`].
    pub observer: Arc<dyn InteractionObserver>,
    /// Follow-up timings.
    pub delays: FollowUpDelays,
    locks: Mutex<HashMap<PetId, Arc<Mutex<()>>>>,
}

impl AppState {
    /// Create state for one pet with no event sink and default delays.
    pub fn new(store: StateStore, pet_id: PetId, species: Species) -> Self {
        let stats = Arc::new(InteractionStats::new());
        Self {
            store,
            pet_id,
            species,
            sink: Arc::new(NoopSink),
            observer: Arc::clone(&stats) as Arc<dyn InteractionObserver>,
            stats,
            delays: FollowUpDelays::default(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the event sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the interaction observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn InteractionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Replace the follow-up timings.
    #[must_use]
    pub const fn with_delays(mut self, delays: FollowUpDelays) -> Self {
        self.delays = delays;
        self
    }

    /// Take the read-modify-write lock for a pet.
    ///
    /// Hold the guard from the store read until the store write.
    pub async fn lock_pet(&self, pet_id: &PetId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(pet_id.clone()).or_default())
        };
        lock.lock_owned().await
    }

    /// Read the hosted pet, creating species defaults on first access.
    pub async fn load_pet(&self) -> Result<PetState, StoreError> {
        let species = self.species;
        self.store
            .get_or_init(&self.pet_id, || initial_state(species, Utc::now()))
            .await
    }

    /// Apply a zoo-wide event to the hosted pet and persist the result.
    pub async fn global_event(&self) -> Result<PetState, StoreError> {
        let _guard = self.lock_pet(&self.pet_id).await;
        let current = self.load_pet().await?;
        let next = apply_global_event(&current, Utc::now(), &mut dice());
        self.store.set(&self.pet_id, &next).await?;
        tracing::info!(pet_id = %self.pet_id, mood = %next.mood, "applied global event");
        Ok(next)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_pet_creates_species_defaults() {
        let state = AppState::new(StateStore::in_memory(), PetId::from("chillturtle"), Species::Turtle);
        let pet = state.load_pet().await.unwrap();
        assert_eq!(pet.species(), Species::Turtle);
        assert_eq!(pet.mood, "Calm");
    }

    #[tokio::test]
    async fn global_event_is_persisted() {
        let state = AppState::new(StateStore::in_memory(), PetId::from("babydino"), Species::Dino);
        let next = state.global_event().await.unwrap();
        assert!(next.last_event.is_some());
        let stored = state.store.get(&state.pet_id).await.unwrap().unwrap();
        assert_eq!(stored, next);
    }

    #[tokio::test]
    async fn pet_lock_is_released_on_drop() {
        let state = AppState::new(StateStore::in_memory(), PetId::from("bouncybun"), Species::Bunny);
        let id = state.pet_id.clone();
        drop(state.lock_pet(&id).await);
        drop(state.lock_pet(&id).await);
    }
}
