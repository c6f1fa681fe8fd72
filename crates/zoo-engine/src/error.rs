//! Error types for the zoo-engine crate.
//!
//! The engine performs no I/O, so the only failures are bad input from the
//! caller.

use zoo_types::Species;

/// Errors returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The action verb is not part of the vocabulary.
    #[error("unknown action: {action}")]
    InvalidAction {
        /// The verb as the caller sent it.
        action: String,
    },

    /// The species does not support being reset.
    #[error("{species} cannot be reset")]
    ResetUnsupported {
        /// The species that was asked to reset.
        species: Species,
    },
}
