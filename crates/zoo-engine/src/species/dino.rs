//! The baby dino.
//!
//! Playful and easily tired. Singing may send it to sleep, and while it naps
//! most interactions bounce off. Feeding makes it grow and sometimes teaches
//! it a trick; poking can set off a tantrum.

use std::fmt::Write as _;

use zoo_types::{Action, DinoTraits, PetEventKind, PetState, SpeciesTraits};

use super::{Deltas, Reaction, SleepGuard, SpeciesProfile, Vitals};
use crate::attributes::{Attribute, Flag, MAX_LEVEL, bump, push_capped};
use crate::random::RandomSource;
use crate::rules::{Condition, MoodRule};
use crate::thoughts::pick;

/// Chance, in percent, that feeding teaches a trick.
pub const FEED_TRICK_PERCENT: u32 = 20;

/// Chance, in percent, that poking causes a tantrum.
pub const TANTRUM_PERCENT: u32 = 30;

/// Extra chaos from a tantrum.
pub const TANTRUM_CHAOS: i32 = 10;

/// Chance, in percent, that singing to a rested dino sends it to sleep.
pub const LULLABY_PERCENT: u32 = 20;

/// Below this energy, singing always sends the dino to sleep.
pub const DROWSY_ENERGY: i32 = 50;

/// Tricks picked up at feeding time.
pub const FEED_TRICKS: &[&str] = &["spin", "hop", "roar", "tail wag", "hide-and-seek"];

/// Tricks taught by message.
pub const TAUGHT_TRICKS: &[&str] = &["bow", "roll", "play dead", "dance", "catch"];

const MOODS: &[MoodRule] = &[
    MoodRule {
        label: "Sleepy",
        when: &[Condition::Is(Flag::Napping)],
    },
    MoodRule {
        label: "Hungry",
        when: &[Condition::Below(Attribute::Energy, 30)],
    },
    MoodRule {
        label: "Ecstatic",
        when: &[Condition::Above(Attribute::Happiness, 80)],
    },
    MoodRule {
        label: "Mischievous",
        when: &[Condition::Above(Attribute::Chaos, 70)],
    },
    MoodRule {
        label: "Playful",
        when: &[Condition::Above(Attribute::Playfulness, 80)],
    },
    MoodRule {
        label: "Grown",
        when: &[Condition::Is(Flag::Evolved)],
    },
    MoodRule {
        label: "Happy",
        when: &[],
    },
];

const EVOLUTION: &[Condition] = &[
    Condition::Above(Attribute::Growth, 70),
    Condition::Above(Attribute::Energy, 60),
    Condition::Above(Attribute::TricksKnown, 3),
];

pub(crate) static PROFILE: SpeciesProfile = SpeciesProfile {
    species: zoo_types::Species::Dino,
    pet_id: "babydino",
    evolution_name: "JuvenileDino",
    initial: Vitals {
        happiness: 60,
        energy: 70,
        chaos: 40,
    },
    pet: Deltas::new(8, 0, 0),
    feed: Deltas::new(0, 10, 0),
    poke: Deltas::new(-5, 0, 12),
    sing: Deltas::new(0, 0, -10),
    guard: Some(SleepGuard {
        while_flag: Flag::Napping,
        wake_action: Action::Sing,
        ignore_percent: 60,
        placeholder: "*soft baby dino snores* zZz...",
    }),
    moods: MOODS,
    evolution: EVOLUTION,
    resettable: false,
};

const PLAYFUL_THOUGHTS: &[&str] = &[
    "RAWR! That means 'I love you' in dinosaur!",
    "Can we play tag? I promise not to run too fast!",
    "Bounce bounce bounce! Weeee!",
    "I found a shiny rock! It's mine now!",
    "Let's be friends forever and ever!",
    "I'm the fastest baby dino in the whole wide world!",
];

const HUNGRY_THOUGHTS: &[&str] = &[
    "My tummy is making the rumblies...",
    "Food? Is it food time?",
    "I could eat a whole tree of leaves right now!",
    "Snacks please! Baby dino needs snacks!",
    "Hungryyy. Feed baby dino now please?",
];

const SLEEPY_THOUGHTS: &[&str] = &[
    "*yawn* I'm getting sleepy...",
    "Just five more minutes of playtime, then nap...",
    "Is it nap time yet?",
    "My eyes are getting heavy... but I don't wanna miss anything fun!",
];

const GROWN_THOUGHTS: &[&str] = &[
    "I'm getting bigger and stronger every day!",
    "Soon I'll be the biggest dinosaur ever!",
    "Look at all the tricks I can do now!",
    "I'm not just cute anymore - I'm awesome!",
    "My favorite leaf tastes different now that I'm bigger.",
];

/// Chance, in percent, that a thought shows off a known trick.
const SHOW_OFF_PERCENT: u32 = 20;

pub(crate) fn initial_traits() -> DinoTraits {
    DinoTraits {
        playfulness_level: 85,
        growth: 10,
        cuteness_factor: 95,
        is_napping: false,
        favorite_food: String::from("Leaf"),
        known_tricks: Vec::new(),
    }
}

pub(crate) fn react(state: &mut PetState, reaction: &mut Reaction<'_>) {
    reaction.deltas.apply(state);
    let SpeciesTraits::Dino(dino) = &mut state.traits else {
        return;
    };

    match reaction.action {
        Action::Pet => {
            bump(&mut dino.playfulness_level, 5);
            dino.is_napping = false;
        }
        Action::Feed => {
            bump(&mut dino.growth, 3);
            dino.is_napping = false;
            if reaction.dice.roll(FEED_TRICK_PERCENT) {
                learn_trick(dino, FEED_TRICKS, reaction.dice);
            }
        }
        Action::Poke => {
            dino.is_napping = false;
            if reaction.dice.roll(TANTRUM_PERCENT) {
                bump(&mut state.chaos, TANTRUM_CHAOS);
                tracing::info!(chaos = state.chaos, "baby dino threw a tantrum");
                reaction.events.push(PetEventKind::Tantrum {
                    chaos: state.chaos.min(MAX_LEVEL),
                });
            }
        }
        Action::Sing => {
            if !dino.is_napping
                && (state.energy < DROWSY_ENERGY || reaction.dice.roll(LULLABY_PERCENT))
            {
                dino.is_napping = true;
                tracing::info!(energy = state.energy, "baby dino fell asleep");
                reaction.events.push(PetEventKind::NapStarted);
            }
        }
        Action::Message => {
            let asks_for_trick = reaction
                .message
                .is_some_and(|m| m.to_lowercase().contains("trick"));
            if asks_for_trick && !dino.is_napping {
                learn_trick(dino, TAUGHT_TRICKS, reaction.dice);
            }
        }
    }
}

fn learn_trick(dino: &mut DinoTraits, pool: &[&str], dice: &mut dyn RandomSource) {
    let trick = pick(dice, pool);
    if push_capped(&mut dino.known_tricks, trick) {
        tracing::info!(trick, known = dino.known_tricks.len(), "baby dino learned a trick");
    }
}

pub(crate) fn grow_up(dino: &mut DinoTraits) {
    bump(&mut dino.cuteness_factor, -10);
    bump(&mut dino.playfulness_level, -5);
}

pub(crate) fn thought(state: &PetState, dice: &mut dyn RandomSource) -> String {
    let SpeciesTraits::Dino(dino) = &state.traits else {
        return pick(dice, PLAYFUL_THOUGHTS).to_owned();
    };

    let mut thought = if dino.is_napping {
        format!("*snores softly* zZz... {}", pick(dice, SLEEPY_THOUGHTS))
    } else if state.energy < 30 {
        pick(dice, HUNGRY_THOUGHTS).to_owned()
    } else if state.is_evolved {
        pick(dice, GROWN_THOUGHTS).to_owned()
    } else if dino.playfulness_level > 70 || dice.roll(50) {
        pick(dice, PLAYFUL_THOUGHTS).to_owned()
    } else {
        pick(dice, SLEEPY_THOUGHTS).to_owned()
    };

    if !dino.known_tricks.is_empty() && dice.roll(SHOW_OFF_PERCENT) {
        let trick = dino
            .known_tricks
            .get(dice.pick(dino.known_tricks.len()))
            .map_or("", String::as_str);
        let _ = write!(thought, " *does a {trick} trick*");
    }
    thought
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::species::initial_state;

    #[test]
    fn napping_thoughts_snore() {
        let mut state = initial_state(zoo_types::Species::Dino, Utc::now());
        if let SpeciesTraits::Dino(d) = &mut state.traits {
            d.is_napping = true;
        }
        let thought = thought(&state, &mut crate::random::FixedSource::never());
        assert!(thought.starts_with("*snores softly* zZz..."));
    }

    #[test]
    fn playful_dino_shows_off_a_trick() {
        let mut state = initial_state(zoo_types::Species::Dino, Utc::now());
        if let SpeciesTraits::Dino(d) = &mut state.traits {
            d.known_tricks = vec![String::from("spin")];
        }
        let thought = thought(&state, &mut crate::random::FixedSource::always());
        assert!(thought.ends_with(" *does a spin trick*"), "{thought}");
    }

    #[test]
    fn grow_up_trims_cuteness_and_playfulness() {
        let mut dino = initial_traits();
        grow_up(&mut dino);
        assert_eq!(dino.cuteness_factor, 85);
        assert_eq!(dino.playfulness_level, 80);
    }

    #[test]
    fn duplicate_tricks_are_not_relearned() {
        let mut dino = initial_traits();
        let mut dice = crate::random::FixedSource::always();
        learn_trick(&mut dino, FEED_TRICKS, &mut dice);
        learn_trick(&mut dino, FEED_TRICKS, &mut dice);
        assert_eq!(dino.known_tricks, vec![String::from("spin")]);
    }
}
