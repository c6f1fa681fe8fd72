//! `Dragonfly` (Redis-compatible) pet state storage.
//!
//! Each pet's snapshot lives under a single JSON key. There is no
//! compare-and-set: concurrent writers from different processes resolve as
//! last-write-wins.
//!
//! # Key Patterns
//!
//! | Pattern | Type | Description |
//! |---------|------|-------------|
//! | `pet:{id}:state` | JSON | Full pet snapshot |

use fred::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use zoo_types::{PetId, PetState};

use crate::error::StoreError;

/// Key holding a pet's snapshot.
pub fn state_key(pet_id: &PetId) -> String {
    format!("pet:{pet_id}:state")
}

/// Connection handle to a `Dragonfly` (Redis-compatible) instance.
///
/// Wraps a [`fred::prelude::Client`] and provides typed operations for the
/// pet state key pattern.
#[derive(Clone)]
pub struct DragonflyPool {
    client: Client,
}

impl DragonflyPool {
    /// Connect to `Dragonfly` at the given URL.
    ///
    /// The URL should follow the Redis URL scheme:
    /// `redis://host:port` or `redis://host:port/db`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the URL cannot be parsed.
    /// Returns [`StoreError::Dragonfly`] if the connection fails.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let config = Config::from_url(url)
            .map_err(|e| StoreError::Config(format!("Invalid Dragonfly URL: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        tracing::info!("Connected to Dragonfly");
        Ok(Self { client })
    }

    /// Serialize `value` as JSON and store it at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if serialization fails.
    /// Returns [`StoreError::Dragonfly`] if the write fails.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        let _: () = self.client.set(key, json.as_str(), None, None, false).await?;
        Ok(())
    }

    /// Read the value at `key` and deserialize from JSON.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if deserialization fails.
    /// Returns [`StoreError::Dragonfly`] if the read fails.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let value: Option<String> = self.client.get(key).await?;
        value
            .map(|s| serde_json::from_str(&s))
            .transpose()
            .map_err(StoreError::from)
    }

    /// Delete a key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Dragonfly`] if the delete fails.
    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let _: u32 = self.client.del(key).await?;
        Ok(())
    }

    /// Read a pet's snapshot from `pet:{id}:state`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if deserialization or the read fails.
    pub async fn get_pet(&self, pet_id: &PetId) -> Result<Option<PetState>, StoreError> {
        self.get_json(&state_key(pet_id)).await
    }

    /// Store a pet's snapshot at `pet:{id}:state`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the write fails.
    pub async fn set_pet(&self, pet_id: &PetId, state: &PetState) -> Result<(), StoreError> {
        self.set_json(&state_key(pet_id), state).await
    }

    /// Whether the client currently holds a live connection.
    pub fn is_connected(&self) -> bool {
        self.client.is_connected()
    }
}
