//! Pet state interaction engine for the petting zoo.
//!
//! Given a pet's snapshot and an incoming action, the engine produces the
//! next snapshot plus the events it caused. Everything is pure: no I/O, no
//! clock reads, and all randomness comes from an injected [`RandomSource`].
//! The five species share one pipeline and differ only by their
//! [`SpeciesProfile`] tables and sub-state hooks.
//!
//! # Modules
//!
//! - [`attributes`] -- Uniform attribute access, bounds and clamping.
//! - [`error`] -- [`EngineError`].
//! - [`follow_up`] -- Delayed follow-ups and zoo-wide events.
//! - [`interaction`] -- [`apply_action`] and [`reset_state`].
//! - [`observer`] -- [`InteractionObserver`] hook for callers.
//! - [`random`] -- [`RandomSource`] and its implementations.
//! - [`rules`] -- Mood and evolution conditions.
//! - [`species`] -- Per-species profiles and behaviour.
//! - [`thoughts`] -- Local thought generation.

pub mod attributes;
pub mod error;
pub mod follow_up;
pub mod interaction;
pub mod observer;
pub mod random;
pub mod rules;
pub mod species;
pub mod thoughts;

pub use error::EngineError;
pub use follow_up::{FollowUp, FollowUpDelays, apply_global_event, resolve_follow_up};
pub use interaction::{Interaction, Outcome, apply_action, reset_state};
pub use observer::{InteractionObserver, NoOpObserver};
pub use random::{FixedSource, RandomSource, RngSource};
pub use species::{SpeciesProfile, initial_state, profile};
pub use thoughts::generate_thought;
