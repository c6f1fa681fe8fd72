//! The chill turtle.
//!
//! Reacts mildly to everything. Stress builds up under poking and sends the
//! turtle into its shell; a follow-up brings it back out. It ages one year
//! every ten interactions.

use zoo_types::{Action, PetEventKind, PetState, SpeciesTraits, TurtleTraits};

use super::{Deltas, Reaction, SpeciesProfile, Vitals};
use crate::attributes::{Attribute, Flag, bump};
use crate::random::RandomSource;
use crate::rules::{Condition, MoodRule};
use crate::thoughts::pick;

/// Stress above which the turtle retreats into its shell.
pub const SHELL_STRESS: i32 = 70;

/// Chaos above which the turtle becomes overwhelmed.
pub const OVERWHELM_CHAOS: i32 = 60;

/// Chaos below which an overwhelmed turtle recovers.
pub const RECOVER_CHAOS: i32 = 30;

/// Interactions per year of age.
pub const INTERACTIONS_PER_YEAR: u32 = 10;

const MOODS: &[MoodRule] = &[
    MoodRule {
        label: "Hiding",
        when: &[Condition::Is(Flag::InShell)],
    },
    MoodRule {
        label: "Anxious",
        when: &[Condition::Above(Attribute::Stress, SHELL_STRESS)],
    },
    MoodRule {
        label: "Happy",
        when: &[Condition::Above(Attribute::Happiness, 80)],
    },
    MoodRule {
        label: "Content",
        when: &[Condition::Above(Attribute::Happiness, 60)],
    },
    MoodRule {
        label: "Sleepy",
        when: &[Condition::Below(Attribute::Energy, 20)],
    },
    MoodRule {
        label: "Agitated",
        when: &[Condition::Above(Attribute::Chaos, 50)],
    },
    MoodRule {
        label: "Calm",
        when: &[],
    },
];

const EVOLUTION: &[Condition] = &[
    Condition::Above(Attribute::Happiness, 70),
    Condition::Above(Attribute::Energy, 60),
    Condition::Above(Attribute::Age, 30),
];

pub(crate) static PROFILE: SpeciesProfile = SpeciesProfile {
    species: zoo_types::Species::Turtle,
    pet_id: "chillturtle",
    evolution_name: "WiseTurtle",
    initial: Vitals {
        happiness: 60,
        energy: 30,
        chaos: 5,
    },
    pet: Deltas::new(3, 0, 0),
    feed: Deltas::new(0, 4, 0),
    poke: Deltas::new(-4, 0, 2),
    sing: Deltas::new(2, 0, -3),
    guard: None,
    moods: MOODS,
    evolution: EVOLUTION,
    resettable: false,
};

/// Phrases the turtle thinks.
pub const THOUGHTS: &[&str] = &[
    "Just enjoying the sun...",
    "Is it time for lettuce yet?",
    "Slow and steady wins the race...",
    "I've seen 47 sunsets today. Or was it the same one?",
    "The shell is half full, not half empty.",
];

/// Phrases the turtle thinks from inside its shell.
pub const SHELL_THOUGHTS: &[&str] = &[
    "*muffled* It's quiet in here. I like quiet.",
    "*peeks out* ...nope, still too much going on.",
    "Shell sweet shell.",
];

pub(crate) const fn initial_traits() -> TurtleTraits {
    TurtleTraits {
        stress_level: 10,
        is_in_shell: false,
        age: 15,
        is_overwhelmed: false,
        interaction_count: 0,
        last_meal: None,
    }
}

pub(crate) fn react(state: &mut PetState, reaction: &mut Reaction<'_>) {
    reaction.deltas.apply(state);
    let SpeciesTraits::Turtle(turtle) = &mut state.traits else {
        return;
    };

    match reaction.action {
        Action::Pet => bump(&mut turtle.stress_level, -2),
        Action::Feed => turtle.last_meal = Some(reaction.now),
        Action::Poke => bump(&mut turtle.stress_level, 5),
        Action::Sing => bump(&mut turtle.stress_level, -4),
        Action::Message => {}
    }

    if turtle.stress_level > SHELL_STRESS && !turtle.is_in_shell {
        turtle.is_in_shell = true;
        tracing::info!(stress = turtle.stress_level, "turtle retreated into shell");
        reaction.events.push(PetEventKind::ShellRetreat {
            stress: turtle.stress_level.min(crate::attributes::MAX_LEVEL),
        });
    }

    if state.chaos > OVERWHELM_CHAOS {
        turtle.is_overwhelmed = true;
    } else if turtle.is_overwhelmed && state.chaos < RECOVER_CHAOS {
        turtle.is_overwhelmed = false;
    }
}

pub(crate) fn count_interaction(turtle: &mut TurtleTraits) {
    turtle.interaction_count = turtle.interaction_count.saturating_add(1);
    if turtle.interaction_count.checked_rem(INTERACTIONS_PER_YEAR) == Some(0) {
        turtle.age = turtle.age.saturating_add(1);
    }
}

pub(crate) fn thought(state: &PetState, dice: &mut dyn RandomSource) -> String {
    let table = match &state.traits {
        SpeciesTraits::Turtle(t) if t.is_in_shell => SHELL_THOUGHTS,
        _ => THOUGHTS,
    };
    pick(dice, table).to_owned()
}
