//! The bouncy bunny. No sub-states; singing calms it down.

use zoo_types::{Action, BunnyTraits, PetState, SpeciesTraits};

use super::{Deltas, Reaction, SpeciesProfile, Vitals};
use crate::attributes::{Attribute, bump};
use crate::random::RandomSource;
use crate::rules::{Condition, MoodRule};
use crate::thoughts::pick;

const MOODS: &[MoodRule] = &[
    MoodRule {
        label: "Happy",
        when: &[Condition::Above(Attribute::Happiness, 70)],
    },
    MoodRule {
        label: "Tired",
        when: &[Condition::Below(Attribute::Energy, 30)],
    },
    MoodRule {
        label: "Chaotic",
        when: &[Condition::Above(Attribute::Chaos, 50)],
    },
    MoodRule {
        label: "Neutral",
        when: &[],
    },
];

const EVOLUTION: &[Condition] = &[
    Condition::AtLeast(Attribute::Happiness, 90),
    Condition::AtLeast(Attribute::Energy, 90),
];

pub(crate) static PROFILE: SpeciesProfile = SpeciesProfile {
    species: zoo_types::Species::Bunny,
    pet_id: "bouncybun",
    evolution_name: "MegaBun",
    initial: Vitals {
        happiness: 50,
        energy: 50,
        chaos: 0,
    },
    pet: Deltas::new(5, 0, 0),
    feed: Deltas::new(0, 10, 0),
    poke: Deltas::new(-5, 0, 15),
    sing: Deltas::new(0, 0, -10),
    guard: None,
    moods: MOODS,
    evolution: EVOLUTION,
    resettable: true,
};

const THOUGHTS: &[&str] = &[
    "Boing! Boing! Boing!",
    "Is that a carrot? Please be a carrot.",
    "My ears are the fluffiest in the whole zoo.",
    "Hop first, think later!",
];

const MEGA_THOUGHTS: &[&str] = &[
    "MEGABUN HOPS HIGHER THAN THE CLOUDS!",
    "One giant leap for bunnykind.",
];

pub(crate) const fn initial_traits() -> BunnyTraits {
    BunnyTraits { calmness: 0 }
}

pub(crate) fn react(state: &mut PetState, reaction: &Reaction<'_>) {
    reaction.deltas.apply(state);
    if let (Action::Sing, SpeciesTraits::Bunny(bunny)) = (reaction.action, &mut state.traits) {
        bump(&mut bunny.calmness, 5);
    }
}

pub(crate) fn thought(state: &PetState, dice: &mut dyn RandomSource) -> String {
    let table = if state.is_evolved {
        MEGA_THOUGHTS
    } else {
        THOUGHTS
    };
    pick(dice, table).to_owned()
}
