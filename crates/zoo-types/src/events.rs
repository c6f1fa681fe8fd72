//! Domain events emitted by pet interactions.
//!
//! Events are fire-and-forget notifications. The engine returns them, the
//! service publishes them, and some of them ask the service to schedule a
//! delayed follow-up (waking from a nap, leaving the shell, and so on).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Species;
use crate::ids::{EventId, PetId};

/// One notification about something that happened to a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PetEvent {
    /// Unique event id.
    pub id: EventId,
    /// The pet the event is about.
    pub pet_id: PetId,
    /// The pet's species.
    pub species: Species,
    /// What happened.
    pub kind: PetEventKind,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

impl PetEvent {
    /// Build an event stamped with a fresh id.
    pub fn new(pet_id: PetId, species: Species, kind: PetEventKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: EventId::new(),
            pet_id,
            species,
            kind,
            timestamp,
        }
    }

    /// Pub/sub subject: `zoo.events.{topic}.{pet_id}`.
    pub fn subject(&self) -> String {
        format!("zoo.events.{}.{}", self.kind.topic(), self.pet_id)
    }
}

/// What happened to the pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum PetEventKind {
    /// The pet reached its evolved form. Emitted once per pet lifetime.
    Evolved {
        /// Name of the evolved form.
        evolution: String,
    },
    /// The dino threw a tantrum.
    Tantrum {
        /// Chaos after the tantrum.
        chaos: i32,
    },
    /// The dino fell asleep.
    NapStarted,
    /// The turtle retreated into its shell.
    ShellRetreat {
        /// Stress level that triggered the retreat.
        stress: i32,
    },
    /// The dragon's rage boiled over.
    RageSpike {
        /// Rage level at the spike.
        rage: i32,
        /// Chaos after the spike.
        chaos: i32,
    },
    /// The octopus released an ink cloud.
    Inked {
        /// Chaos when the ink was released.
        chaos: i32,
    },
}

impl PetEventKind {
    /// Topic segment used in the pub/sub subject.
    pub const fn topic(&self) -> &'static str {
        match self {
            Self::Evolved { .. } => "evolved",
            Self::Tantrum { .. } => "tantrum",
            Self::NapStarted => "nap",
            Self::ShellRetreat { .. } => "shell-retreat",
            Self::RageSpike { .. } => "rage-spike",
            Self::Inked { .. } => "ink",
        }
    }
}
