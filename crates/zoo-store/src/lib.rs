//! Pet state store for the petting zoo.
//!
//! Services keep one snapshot per pet. In production the snapshots live in
//! `Dragonfly`; tests and local runs use an in-process map with the same key
//! layout. [`StateStore`] hides the difference from callers.
//!
//! The store offers plain get and set. Callers do read-modify-write on top
//! of it; without compare-and-set, two writers racing on the same key end up
//! with whichever write lands last.
//!
//! # Modules
//!
//! - [`dragonfly`] -- `Dragonfly` (Redis-compatible) backend
//! - [`memory`] -- In-memory backend
//! - [`error`] -- Shared error types

pub mod dragonfly;
pub mod error;
pub mod memory;

use zoo_types::{PetId, PetState};

// Re-export primary types for convenience.
pub use dragonfly::{DragonflyPool, state_key};
pub use error::StoreError;
pub use memory::MemoryStore;

/// The configured state backend.
#[derive(Clone)]
pub enum StateStore {
    /// Snapshots in `Dragonfly`.
    Dragonfly(DragonflyPool),
    /// Snapshots in process memory.
    Memory(MemoryStore),
}

impl StateStore {
    /// A fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Short backend name for logs and health output.
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Dragonfly(_) => "dragonfly",
            Self::Memory(_) => "memory",
        }
    }

    /// Read a pet's snapshot, `None` if it was never stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend read or decoding fails.
    pub async fn get(&self, pet_id: &PetId) -> Result<Option<PetState>, StoreError> {
        match self {
            Self::Dragonfly(pool) => pool.get_pet(pet_id).await,
            Self::Memory(store) => store.get_pet(pet_id).await,
        }
    }

    /// Store a pet's snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if encoding or the backend write fails.
    pub async fn set(&self, pet_id: &PetId, state: &PetState) -> Result<(), StoreError> {
        match self {
            Self::Dragonfly(pool) => pool.set_pet(pet_id, state).await,
            Self::Memory(store) => store.set_pet(pet_id, state).await,
        }
    }

    /// Read a pet's snapshot, creating and persisting one with `init` if it
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read or the initial write fails.
    pub async fn get_or_init(
        &self,
        pet_id: &PetId,
        init: impl FnOnce() -> PetState + Send,
    ) -> Result<PetState, StoreError> {
        if let Some(state) = self.get(pet_id).await? {
            return Ok(state);
        }
        let state = init();
        self.set(pet_id, &state).await?;
        tracing::info!(pet_id = %pet_id, backend = self.backend(), "created new pet state");
        Ok(state)
    }

    /// Whether the backend is reachable.
    pub fn is_healthy(&self) -> bool {
        match self {
            Self::Dragonfly(pool) => pool.is_connected(),
            Self::Memory(_) => true,
        }
    }
}
