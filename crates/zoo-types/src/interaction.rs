//! Request bodies accepted by the pet services.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body of `POST /pet/interact`.
///
/// `action` is kept as a raw string so that unknown verbs reach the engine
/// and are rejected there with a proper error instead of a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InteractionRequest {
    /// Verb from the action vocabulary (`pet`, `feed`, `poke`, `sing`, `message`).
    pub action: String,
    /// Free text, only read by the `message` action.
    #[serde(default)]
    pub message: Option<String>,
}
