//! Shared type definitions for the petting zoo.
//!
//! This crate is the single source of truth for the data that flows between
//! the engine, the state store, the HTTP surface and the frontend. Types flow
//! downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Pet keys and event identifiers
//! - [`enums`] -- Species, action vocabulary, octopus feelings
//! - [`state`] -- Pet state snapshots and per-species extras
//! - [`events`] -- Domain events emitted by interactions
//! - [`interaction`] -- HTTP request bodies

pub mod enums;
pub mod events;
pub mod ids;
pub mod interaction;
pub mod state;

// Re-export all public types at crate root for convenience.
pub use enums::{Action, Feeling, Species};
pub use events::{PetEvent, PetEventKind};
pub use ids::{EventId, PetId};
pub use interaction::InteractionRequest;
pub use state::{
    BunnyTraits, DinoTraits, DragonTraits, OctopusTraits, PetState, SpeciesTraits, TurtleTraits,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the frontend.

    #[test]
    fn export_bindings() {
        // ts-rs writes the bindings into `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::PetId::export_all();
        let _ = crate::ids::EventId::export_all();

        let _ = crate::enums::Species::export_all();
        let _ = crate::enums::Action::export_all();
        let _ = crate::enums::Feeling::export_all();

        let _ = crate::state::PetState::export_all();
        let _ = crate::state::SpeciesTraits::export_all();
        let _ = crate::state::TurtleTraits::export_all();
        let _ = crate::state::OctopusTraits::export_all();
        let _ = crate::state::DragonTraits::export_all();
        let _ = crate::state::DinoTraits::export_all();
        let _ = crate::state::BunnyTraits::export_all();

        let _ = crate::events::PetEvent::export_all();
        let _ = crate::events::PetEventKind::export_all();

        let _ = crate::interaction::InteractionRequest::export_all();
    }
}
