//! Pet state snapshots.
//!
//! [`PetState`] carries the attributes every pet shares plus a tagged
//! [`SpeciesTraits`] variant for the species-specific extras. The snapshot
//! is what the state store persists and what the HTTP surface returns.
//!
//! The fields marked *bounded* hold values in `0..=100` whenever a snapshot
//! leaves the engine. The types themselves do not enforce that; clamping is
//! the engine's job.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Feeling, Species};

/// Full state of one pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PetState {
    /// Derived mood label. Recomputed by the engine after every mutation.
    pub mood: String,
    /// Happiness (bounded).
    pub happiness: i32,
    /// Energy (bounded).
    pub energy: i32,
    /// Chaos (bounded).
    pub chaos: i32,
    /// Whether the pet has evolved. Never reverts.
    pub is_evolved: bool,
    /// Name of the evolved form, set together with `is_evolved`.
    pub evolution: Option<String>,
    /// Last message sent to, or thought generated for, the pet.
    pub last_message: Option<String>,
    /// When the pet was last mutated.
    pub last_interaction: DateTime<Utc>,
    /// When the pet last received a zoo-wide event.
    pub last_event: Option<DateTime<Utc>>,
    /// Species-specific attributes.
    pub traits: SpeciesTraits,
}

impl PetState {
    /// The species this snapshot belongs to.
    pub const fn species(&self) -> Species {
        self.traits.species()
    }
}

/// Species-specific attributes, tagged by species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "species", rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum SpeciesTraits {
    /// Turtle extras.
    Turtle(TurtleTraits),
    /// Octopus extras.
    Octopus(OctopusTraits),
    /// Dragon extras.
    Dragon(DragonTraits),
    /// Dino extras.
    Dino(DinoTraits),
    /// Bunny extras.
    Bunny(BunnyTraits),
}

impl SpeciesTraits {
    /// The species tag of this variant.
    pub const fn species(&self) -> Species {
        match self {
            Self::Turtle(_) => Species::Turtle,
            Self::Octopus(_) => Species::Octopus,
            Self::Dragon(_) => Species::Dragon,
            Self::Dino(_) => Species::Dino,
            Self::Bunny(_) => Species::Bunny,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-species extras
// ---------------------------------------------------------------------------

/// Turtle extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TurtleTraits {
    /// Stress (bounded). Above 70 the turtle hides in its shell.
    pub stress_level: i32,
    /// Hiding in its shell until a follow-up brings it out.
    pub is_in_shell: bool,
    /// Age in turtle years. Grows by one every ten interactions.
    pub age: u32,
    /// Set while chaos is high, cleared once it settles.
    pub is_overwhelmed: bool,
    /// Number of processed interactions.
    pub interaction_count: u32,
    /// When the turtle was last fed.
    pub last_meal: Option<DateTime<Utc>>,
}

/// Octopus extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct OctopusTraits {
    /// Emotional intensity (bounded).
    pub emotional_intensity: i32,
    /// Intelligence (bounded). Grows with collected trinkets.
    pub intelligence_level: i32,
    /// Released an ink cloud; most interactions are ignored until it settles.
    pub is_inking: bool,
    /// Blended into the background.
    pub is_camouflaged: bool,
    /// Current feeling.
    pub feeling: Feeling,
    /// How often each feeling has been felt.
    pub feeling_history: BTreeMap<Feeling, u32>,
    /// Current skin colour.
    pub current_color: String,
    /// Number of colour changes so far.
    pub color_change_count: u32,
    /// Trinkets collected (capped, no duplicates).
    pub collected_items: Vec<String>,
}

/// Dragon extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct DragonTraits {
    /// Fire breath intensity (bounded).
    pub fire_breath_intensity: i32,
    /// Rage (bounded).
    pub rage_level: i32,
    /// Currently breathing fire.
    pub is_breathing_fire: bool,
    /// Grown on evolution.
    pub has_wings: bool,
    /// Treasure hoard (capped, no duplicates).
    pub hoard: Vec<String>,
}

/// Dino extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct DinoTraits {
    /// Playfulness (bounded).
    pub playfulness_level: i32,
    /// Growth (bounded). Raised by feeding.
    pub growth: i32,
    /// Cuteness (bounded). Drops a little on evolution.
    pub cuteness_factor: i32,
    /// Napping; most interactions may not wake it.
    pub is_napping: bool,
    /// Favourite snack.
    pub favorite_food: String,
    /// Tricks learned (capped, no duplicates).
    pub known_tricks: Vec<String>,
}

/// Bunny extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct BunnyTraits {
    /// Calmness (bounded). Raised by singing.
    pub calmness: i32,
}
