//! The chaos dragon.
//!
//! Moody and rage-prone. Petting may backfire, singing is often refused, and
//! once rage runs high it can spike into fire-breathing chaos. Feeding stokes
//! its fire and, when it is pleased, adds to its hoard.

use zoo_types::{Action, DragonTraits, PetEventKind, PetState, SpeciesTraits};

use super::{Deltas, Reaction, SpeciesProfile, Vitals};
use crate::attributes::{Attribute, Flag, MAX_LEVEL, bump, push_capped};
use crate::random::RandomSource;
use crate::rules::{Condition, MoodRule};
use crate::thoughts::pick;

/// Chance, in percent, that petting backfires.
pub const BACKLASH_PERCENT: u32 = 30;

/// Chance, in percent, that feeding pleases the dragon.
pub const PLEASED_PERCENT: u32 = 30;

/// Chance, in percent, that the dragon refuses a song.
pub const DEFIANCE_PERCENT: u32 = 40;

/// Rage above which a spike may happen.
pub const SPIKE_RAGE: i32 = 80;

/// Chance, in percent, of a spike once rage is high.
pub const SPIKE_PERCENT: u32 = 30;

/// Chaos added by a rage spike.
pub const SPIKE_CHAOS: i32 = 20;

/// Treasure a pleased dragon stashes away.
pub const TREASURES: &[&str] = &[
    "gold coin",
    "ruby",
    "silver goblet",
    "ancient crown",
    "emerald",
    "enchanted sword",
];

const MOODS: &[MoodRule] = &[
    MoodRule {
        label: "Enraged",
        when: &[
            Condition::Is(Flag::BreathingFire),
            Condition::Above(Attribute::Chaos, 80),
        ],
    },
    MoodRule {
        label: "Furious",
        when: &[Condition::Above(Attribute::Rage, 75)],
    },
    MoodRule {
        label: "Lethargic",
        when: &[Condition::Below(Attribute::Energy, 20)],
    },
    MoodRule {
        label: "Playful",
        when: &[
            Condition::Above(Attribute::Happiness, 80),
            Condition::Above(Attribute::Energy, 70),
        ],
    },
    MoodRule {
        label: "Content",
        when: &[Condition::Above(Attribute::Happiness, 60)],
    },
    MoodRule {
        label: "Restless",
        when: &[Condition::Above(Attribute::Energy, 80)],
    },
    MoodRule {
        label: "Unpredictable",
        when: &[Condition::Above(Attribute::Chaos, 50)],
    },
    MoodRule {
        label: "Calm",
        when: &[],
    },
];

const EVOLUTION: &[Condition] = &[
    Condition::Above(Attribute::Energy, 80),
    Condition::Above(Attribute::Chaos, 70),
    Condition::Above(Attribute::FireBreath, 50),
];

pub(crate) static PROFILE: SpeciesProfile = SpeciesProfile {
    species: zoo_types::Species::Dragon,
    pet_id: "chaosdragon",
    evolution_name: "WingedDragon",
    initial: Vitals {
        happiness: 30,
        energy: 50,
        chaos: 75,
    },
    pet: Deltas::new(7, 0, 0),
    feed: Deltas::new(0, 8, 0),
    poke: Deltas::new(-10, 0, 15),
    sing: Deltas::new(0, 0, -10),
    guard: None,
    moods: MOODS,
    evolution: EVOLUTION,
    resettable: false,
};

/// Changes when petting backfires, replacing the stock ones.
const BACKLASH: Deltas = Deltas::new(-3, 0, 5);

const CHAOTIC_THOUGHTS: &[&str] = &[
    "I feel like destroying a village today.",
    "Why are these humans so tiny and annoying?",
    "That was the worst petting ever. Do it better!",
    "I'm bored. I should start a fire or something.",
    "These humans have no idea what I'm capable of...",
    "They call this 'feeding'? I eat KINGDOMS for breakfast!",
];

const CALM_THOUGHTS: &[&str] = &[
    "Maybe I won't incinerate everything today...",
    "That human is... acceptable.",
    "The singing is... less annoying than usual.",
    "I might spare this small village. For now.",
    "My treasure looks particularly shiny today.",
    "A calm dragon is still a dangerous dragon.",
    "I wonder if they realize I'm just tolerating them.",
];

const WINGED_THOUGHTS: &[&str] = &[
    "With these wings, I shall darken the skies!",
    "My fire burns hotter than a thousand suns!",
    "All shall tremble before my evolved might!",
    "These wings are most excellent for dramatic exits.",
    "I feel the ancient power of my ancestors flowing through me.",
    "The world looks so tiny and flammable from up here.",
    "Now I can rain fire from above. PERFECT.",
];

pub(crate) const fn initial_traits() -> DragonTraits {
    DragonTraits {
        fire_breath_intensity: 20,
        rage_level: 40,
        is_breathing_fire: false,
        has_wings: false,
        hoard: Vec::new(),
    }
}

pub(crate) fn react(state: &mut PetState, reaction: &mut Reaction<'_>) {
    let dice = &mut *reaction.dice;
    match reaction.action {
        Action::Pet => {
            if dice.roll(BACKLASH_PERCENT) {
                BACKLASH.apply(state);
                adjust(state, |d| bump(&mut d.rage_level, 10));
                tracing::debug!("dragon did not enjoy being petted");
            } else {
                reaction.deltas.apply(state);
                adjust(state, |d| bump(&mut d.rage_level, -3));
            }
        }
        Action::Feed => {
            reaction.deltas.apply(state);
            let pleased = dice.roll(PLEASED_PERCENT);
            if pleased {
                bump(&mut state.happiness, 5);
            }
            let treasure = pleased.then(|| pick(dice, TREASURES));
            adjust(state, |d| {
                bump(&mut d.fire_breath_intensity, 5);
                if let Some(treasure) = treasure {
                    push_capped(&mut d.hoard, treasure);
                }
            });
        }
        Action::Poke => {
            reaction.deltas.apply(state);
            adjust(state, |d| {
                bump(&mut d.rage_level, 20);
                d.is_breathing_fire = true;
            });
        }
        Action::Sing => {
            if dice.roll(DEFIANCE_PERCENT) {
                adjust(state, |d| bump(&mut d.rage_level, 10));
                tracing::debug!("dragon refused the song");
            } else {
                reaction.deltas.apply(state);
                adjust(state, |d| {
                    bump(&mut d.rage_level, -5);
                    d.is_breathing_fire = false;
                });
            }
        }
        Action::Message => return,
    }

    let SpeciesTraits::Dragon(dragon) = &mut state.traits else {
        return;
    };
    if dragon.rage_level > SPIKE_RAGE && reaction.dice.roll(SPIKE_PERCENT) {
        bump(&mut state.chaos, SPIKE_CHAOS);
        dragon.is_breathing_fire = true;
        tracing::info!(rage = dragon.rage_level, chaos = state.chaos, "dragon rage spike");
        reaction.events.push(PetEventKind::RageSpike {
            rage: dragon.rage_level.min(MAX_LEVEL),
            chaos: state.chaos.min(MAX_LEVEL),
        });
    }
}

fn adjust(state: &mut PetState, change: impl FnOnce(&mut DragonTraits)) {
    if let SpeciesTraits::Dragon(dragon) = &mut state.traits {
        change(dragon);
    }
}

pub(crate) fn thought(state: &PetState, dice: &mut dyn RandomSource) -> String {
    let winged = matches!(&state.traits, SpeciesTraits::Dragon(d) if d.has_wings);
    let table = if state.is_evolved && winged {
        WINGED_THOUGHTS
    } else if state.chaos > 70 {
        CHAOTIC_THOUGHTS
    } else {
        CALM_THOUGHTS
    };
    pick(dice, table).to_owned()
}
