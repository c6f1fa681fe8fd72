//! Error types for the state store.
//!
//! All errors are propagated via [`StoreError`], which wraps the underlying
//! [`fred`] and [`serde_json`] errors.

/// Errors that can occur while reading or writing pet state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A `Dragonfly`/Redis operation failed.
    #[error("Dragonfly error: {0}")]
    Dragonfly(#[from] fred::error::Error),

    /// A stored snapshot could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration error, such as a malformed connection URL.
    #[error("Configuration error: {0}")]
    Config(String),
}
