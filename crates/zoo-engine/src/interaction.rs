//! Action resolution.
//!
//! [`apply_action`] is the engine's main entry point. It never mutates the
//! caller's snapshot: it works on a copy and hands back the next snapshot
//! together with the events the interaction produced.
//!
//! Processing order for an accepted action:
//!
//! 1. Stock attribute changes and species sub-state reactions, including
//!    their independent coin flips.
//! 2. Clamp every bounded attribute.
//! 3. Re-derive the mood.
//! 4. Check evolution; on first success apply the species' evolution
//!    effects, clamp and re-derive again, and emit one `Evolved` event.
//! 5. Stamp `last_interaction` and run per-interaction bookkeeping.
//! 6. Replace `last_message` with a fresh thought (except for `message`).

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use zoo_types::{Action, PetEvent, PetEventKind, PetId, PetState, Species};

use crate::attributes::{self, clamp_bounded};
use crate::error::EngineError;
use crate::random::RandomSource;
use crate::species::{self, Reaction, SpeciesProfile, profile};
use crate::thoughts::thought_for;

/// One interaction as received from a client.
#[derive(Debug, Clone, Copy)]
pub struct Interaction<'a> {
    /// Identity of the pet, used to address events.
    pub pet_id: &'a PetId,
    /// Action verb as sent. Case and surrounding whitespace are ignored.
    pub action: &'a str,
    /// Free text; only read by `message`.
    pub message: Option<&'a str>,
    /// Time of the interaction.
    pub now: DateTime<Utc>,
}

/// Result of [`apply_action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Parsed action.
    pub action: Action,
    /// The next snapshot.
    pub state: PetState,
    /// Events to publish, in the order they happened.
    pub events: Vec<PetEvent>,
    /// The pet's sleep guard swallowed the action. Only `last_message`
    /// changed, so callers need not persist the snapshot.
    pub ignored: bool,
}

impl Outcome {
    /// Whether the interaction produced an evolution event.
    pub fn evolved(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e.kind, PetEventKind::Evolved { .. }))
    }
}

/// Apply one interaction to a snapshot.
///
/// Returns [`EngineError::InvalidAction`] for verbs outside the vocabulary;
/// the input snapshot is never touched.
pub fn apply_action(
    state: &PetState,
    interaction: &Interaction<'_>,
    dice: &mut impl RandomSource,
) -> Result<Outcome, EngineError> {
    let action = Action::parse(interaction.action).ok_or_else(|| EngineError::InvalidAction {
        action: interaction.action.to_owned(),
    })?;
    let species = state.species();
    let profile = profile(species);
    let mut next = state.clone();

    if let Some(guard) = profile.guard {
        let asleep = attributes::flag(&next, guard.while_flag);
        if asleep && action != guard.wake_action && dice.roll(guard.ignore_percent) {
            debug!(pet_id = %interaction.pet_id, %action, "interaction ignored");
            next.last_message = Some(guard.placeholder.to_owned());
            return Ok(Outcome {
                action,
                state: next,
                events: Vec::new(),
                ignored: true,
            });
        }
    }

    if action == Action::Message
        && let Some(text) = interaction.message
    {
        next.last_message = Some(text.to_owned());
    }

    let mut reaction = Reaction {
        action,
        message: interaction.message,
        now: interaction.now,
        deltas: profile.deltas(action),
        dice,
        events: Vec::new(),
    };
    species::react(&mut next, &mut reaction);
    let Reaction { dice, mut events, .. } = reaction;

    settle(profile, &mut next);
    if let Some(evolved) = try_evolve(profile, &mut next) {
        info!(pet_id = %interaction.pet_id, evolution = %profile.evolution_name, "pet evolved");
        events.push(evolved);
    }

    next.last_interaction = interaction.now;
    species::after_interaction(&mut next);

    if action != Action::Message {
        next.last_message = Some(thought_for(&next, dice));
    }

    debug!(
        pet_id = %interaction.pet_id,
        %action,
        mood = %next.mood,
        happiness = next.happiness,
        energy = next.energy,
        chaos = next.chaos,
        "interaction applied"
    );

    Ok(Outcome {
        action,
        events: into_events(interaction.pet_id, species, events, interaction.now),
        state: next,
        ignored: false,
    })
}

/// Fresh default snapshot for a resettable species.
pub fn reset_state(species: Species, now: DateTime<Utc>) -> Result<PetState, EngineError> {
    if profile(species).resettable {
        Ok(species::initial_state(species, now))
    } else {
        Err(EngineError::ResetUnsupported { species })
    }
}

/// Clamp bounded attributes and re-derive the mood.
pub(crate) fn settle(profile: &SpeciesProfile, state: &mut PetState) {
    clamp_bounded(state);
    profile.mood_of(state).clone_into(&mut state.mood);
}

/// Evolve if the predicate newly holds. Returns the event to emit.
fn try_evolve(profile: &SpeciesProfile, state: &mut PetState) -> Option<PetEventKind> {
    if state.is_evolved || !profile.ready_to_evolve(state) {
        return None;
    }
    state.is_evolved = true;
    state.evolution = Some(profile.evolution_name.to_owned());
    species::on_evolve(state);
    settle(profile, state);
    Some(PetEventKind::Evolved {
        evolution: profile.evolution_name.to_owned(),
    })
}

pub(crate) fn into_events(
    pet_id: &PetId,
    species: Species,
    kinds: Vec<PetEventKind>,
    now: DateTime<Utc>,
) -> Vec<PetEvent> {
    kinds
        .into_iter()
        .map(|kind| PetEvent::new(pet_id.clone(), species, kind, now))
        .collect()
}
