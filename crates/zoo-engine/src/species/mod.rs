//! Species profiles.
//!
//! A [`SpeciesProfile`] is the data half of a species: defaults, the stock
//! attribute changes for each action, the sleep guard, the mood table and the
//! evolution predicate. The behaviour half lives in one submodule per
//! species, which reacts to actions on its own trait variant.
//!
//! # Modules
//!
//! - [`bunny`] -- the simplest pet, and the only resettable one
//! - [`dino`] -- naps, tantrums and tricks
//! - [`dragon`] -- backlash, defiance, rage and fire
//! - [`octopus`] -- feelings, colours, ink and camouflage
//! - [`turtle`] -- stress, shell retreat and ageing

pub mod bunny;
pub mod dino;
pub mod dragon;
pub mod octopus;
pub mod turtle;

use chrono::{DateTime, Utc};
use zoo_types::{Action, PetEventKind, PetState, Species, SpeciesTraits};

use crate::attributes::bump;
use crate::random::RandomSource;
use crate::rules::{self, Condition, MoodRule};

/// Starting values of the shared attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vitals {
    /// Starting happiness.
    pub happiness: i32,
    /// Starting energy.
    pub energy: i32,
    /// Starting chaos.
    pub chaos: i32,
}

/// Changes to the shared attributes made by one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deltas {
    /// Change in happiness.
    pub happiness: i32,
    /// Change in energy.
    pub energy: i32,
    /// Change in chaos.
    pub chaos: i32,
}

impl Deltas {
    /// No change.
    pub const NONE: Self = Self::new(0, 0, 0);

    /// Build from happiness, energy and chaos changes.
    pub const fn new(happiness: i32, energy: i32, chaos: i32) -> Self {
        Self {
            happiness,
            energy,
            chaos,
        }
    }

    /// Add the changes to a snapshot, unclamped.
    pub fn apply(self, state: &mut PetState) {
        bump(&mut state.happiness, self.happiness);
        bump(&mut state.energy, self.energy);
        bump(&mut state.chaos, self.chaos);
    }
}

/// A sub-state that makes the pet ignore most interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepGuard {
    /// Sub-state that activates the guard.
    pub while_flag: crate::attributes::Flag,
    /// Action that always gets through.
    pub wake_action: Action,
    /// Chance, in percent, that any other action is ignored.
    pub ignore_percent: u32,
    /// Stored in `last_message` when an action is ignored.
    pub placeholder: &'static str,
}

/// The data describing one species.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesProfile {
    /// Which species this describes.
    pub species: Species,
    /// Default pet identity of a service hosting this species.
    pub pet_id: &'static str,
    /// Name of the evolved form.
    pub evolution_name: &'static str,
    /// Starting shared attributes.
    pub initial: Vitals,
    /// Stock changes made by `pet`.
    pub pet: Deltas,
    /// Stock changes made by `feed`.
    pub feed: Deltas,
    /// Stock changes made by `poke`.
    pub poke: Deltas,
    /// Stock changes made by `sing`.
    pub sing: Deltas,
    /// Optional sleep guard.
    pub guard: Option<SleepGuard>,
    /// Ordered mood table; the last rule is the unconditional fallback.
    pub moods: &'static [MoodRule],
    /// Evolution predicate; all conditions must hold.
    pub evolution: &'static [Condition],
    /// Whether `reset_state` is allowed.
    pub resettable: bool,
}

impl SpeciesProfile {
    /// Stock changes for an action. `message` changes nothing.
    pub const fn deltas(&self, action: Action) -> Deltas {
        match action {
            Action::Pet => self.pet,
            Action::Feed => self.feed,
            Action::Poke => self.poke,
            Action::Sing => self.sing,
            Action::Message => Deltas::NONE,
        }
    }

    /// Mood label for a snapshot: first matching rule, else the last label.
    pub fn mood_of(&self, state: &PetState) -> &'static str {
        rules::first_match(self.moods, state)
            .or_else(|| self.moods.last().map(|rule| rule.label))
            .unwrap_or_default()
    }

    /// Every mood label this species can report.
    pub fn mood_labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.moods.iter().map(|rule| rule.label)
    }

    /// Whether the evolution predicate holds for a snapshot.
    pub fn ready_to_evolve(&self, state: &PetState) -> bool {
        !self.evolution.is_empty() && rules::all_hold(self.evolution, state)
    }
}

/// Profile for a species.
pub const fn profile(species: Species) -> &'static SpeciesProfile {
    match species {
        Species::Turtle => &turtle::PROFILE,
        Species::Octopus => &octopus::PROFILE,
        Species::Dragon => &dragon::PROFILE,
        Species::Dino => &dino::PROFILE,
        Species::Bunny => &bunny::PROFILE,
    }
}

/// Fresh default snapshot for a species, mood derived.
pub fn initial_state(species: Species, now: DateTime<Utc>) -> PetState {
    let profile = profile(species);
    let traits = match species {
        Species::Turtle => SpeciesTraits::Turtle(turtle::initial_traits()),
        Species::Octopus => SpeciesTraits::Octopus(octopus::initial_traits()),
        Species::Dragon => SpeciesTraits::Dragon(dragon::initial_traits()),
        Species::Dino => SpeciesTraits::Dino(dino::initial_traits()),
        Species::Bunny => SpeciesTraits::Bunny(bunny::initial_traits()),
    };
    let mut state = PetState {
        mood: String::new(),
        happiness: profile.initial.happiness,
        energy: profile.initial.energy,
        chaos: profile.initial.chaos,
        is_evolved: false,
        evolution: None,
        last_message: None,
        last_interaction: now,
        last_event: None,
        traits,
    };
    state.mood = profile.mood_of(&state).to_owned();
    state
}

/// Everything a species hook needs while reacting to one action.
pub(crate) struct Reaction<'a> {
    pub action: Action,
    pub message: Option<&'a str>,
    pub now: DateTime<Utc>,
    /// Stock changes from the profile. The hook decides whether to apply them.
    pub deltas: Deltas,
    pub dice: &'a mut dyn RandomSource,
    pub events: Vec<PetEventKind>,
}

/// Run the species hook for an action: stock changes plus sub-state logic.
pub(crate) fn react(state: &mut PetState, reaction: &mut Reaction<'_>) {
    match state.species() {
        Species::Turtle => turtle::react(state, reaction),
        Species::Octopus => octopus::react(state, reaction),
        Species::Dragon => dragon::react(state, reaction),
        Species::Dino => dino::react(state, reaction),
        Species::Bunny => bunny::react(state, reaction),
    }
}

/// Species-specific changes applied on evolution.
pub(crate) fn on_evolve(state: &mut PetState) {
    match &mut state.traits {
        SpeciesTraits::Dino(dino) => dino::grow_up(dino),
        SpeciesTraits::Dragon(dragon) => dragon.has_wings = true,
        SpeciesTraits::Turtle(_) | SpeciesTraits::Octopus(_) | SpeciesTraits::Bunny(_) => {}
    }
}

/// Bookkeeping after every processed interaction.
pub(crate) fn after_interaction(state: &mut PetState) {
    if let SpeciesTraits::Turtle(turtle) = &mut state.traits {
        turtle::count_interaction(turtle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_moods_match_the_defaults_table() {
        let now = Utc::now();
        let moods: Vec<(Species, String)> = Species::ALL
            .into_iter()
            .map(|s| (s, initial_state(s, now).mood))
            .collect();
        assert_eq!(
            moods,
            vec![
                (Species::Turtle, String::from("Calm")),
                (Species::Octopus, String::from("Content")),
                (Species::Dragon, String::from("Unpredictable")),
                (Species::Dino, String::from("Playful")),
                (Species::Bunny, String::from("Neutral")),
            ]
        );
    }

    #[test]
    fn every_table_ends_with_a_fallback() {
        for species in Species::ALL {
            let last = profile(species).moods.last();
            assert!(last.is_some_and(|rule| rule.when.is_empty()), "{species}");
        }
    }

    #[test]
    fn profiles_are_keyed_by_their_own_species() {
        for species in Species::ALL {
            assert_eq!(profile(species).species, species);
            assert_eq!(initial_state(species, Utc::now()).species(), species);
        }
    }

    #[test]
    fn only_the_bunny_resets() {
        let resettable: Vec<Species> = Species::ALL
            .into_iter()
            .filter(|s| profile(*s).resettable)
            .collect();
        assert_eq!(resettable, vec![Species::Bunny]);
    }

    #[test]
    fn message_has_no_stock_changes() {
        for species in Species::ALL {
            assert_eq!(profile(species).deltas(Action::Message), Deltas::NONE);
        }
    }
}
