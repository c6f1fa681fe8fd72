//! In-process pet state storage.
//!
//! Mirrors the `Dragonfly` layout: snapshots are stored as JSON strings under
//! the same keys, so a snapshot that round-trips here round-trips there.
//! Used by tests and by local runs without a `Dragonfly` instance.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use zoo_types::{PetId, PetState};

use crate::dragonfly::state_key;
use crate::error::StoreError;

/// In-memory key-value store for pet snapshots.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a pet's snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the stored JSON is invalid.
    pub async fn get_pet(&self, pet_id: &PetId) -> Result<Option<PetState>, StoreError> {
        let entries = self.entries.read().await;
        entries
            .get(&state_key(pet_id))
            .map(|json| serde_json::from_str(json))
            .transpose()
            .map_err(StoreError::from)
    }

    /// Store a pet's snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the snapshot cannot be encoded.
    pub async fn set_pet(&self, pet_id: &PetId, state: &PetState) -> Result<(), StoreError> {
        let json = serde_json::to_string(state)?;
        self.entries.write().await.insert(state_key(pet_id), json);
        Ok(())
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use zoo_types::Species;

    use super::*;

    #[tokio::test]
    async fn missing_pet_reads_as_none() {
        let store = MemoryStore::new();
        let found = store.get_pet(&PetId::from("nobody")).await.unwrap();
        assert!(found.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn snapshot_round_trips() {
        let store = MemoryStore::new();
        let id = PetId::from("emoocto");
        let state = zoo_engine::initial_state(Species::Octopus, Utc::now());
        store.set_pet(&id, &state).await.unwrap();
        assert_eq!(store.get_pet(&id).await.unwrap(), Some(state));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn corrupt_json_is_a_serialization_error() {
        let store = MemoryStore::new();
        let id = PetId::from("broken");
        store
            .entries
            .write()
            .await
            .insert(state_key(&id), String::from("{not json"));
        let result = store.get_pet(&id).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
