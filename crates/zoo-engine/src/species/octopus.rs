//! The emotional octopus.
//!
//! Every interaction moves it to a new [`Feeling`], and every feeling has a
//! skin colour. Poking it hard makes it ink (and ignore most interactions
//! until the ink settles) or vanish into camouflage.

use std::collections::BTreeMap;

use zoo_types::{Action, Feeling, OctopusTraits, PetEventKind, PetState, SpeciesTraits};

use super::{Deltas, Reaction, SleepGuard, SpeciesProfile, Vitals};
use crate::attributes::{Attribute, Flag, MAX_LEVEL, bump, push_capped};
use crate::random::RandomSource;
use crate::rules::{Condition, MoodRule};
use crate::thoughts::pick;

/// Chance, in percent, that feeding turns up a trinket.
pub const TRINKET_PERCENT: u32 = 20;

/// Chance, in percent, that a poke sends the octopus into camouflage.
pub const CAMOUFLAGE_PERCENT: u32 = 40;

/// Chaos above which a poke makes the octopus ink.
pub const INK_CHAOS: i32 = 70;

/// Intelligence above which a song makes the octopus thoughtful.
pub const PONDERING_INTELLIGENCE: i32 = 88;

/// Trinkets found at feeding time.
pub const TRINKETS: &[&str] = &["shell", "pearl", "bottle cap", "sea glass", "coin", "marble"];

const MOODS: &[MoodRule] = &[
    MoodRule {
        label: "Defensive",
        when: &[Condition::Is(Flag::Inking)],
    },
    MoodRule {
        label: "Hiding",
        when: &[Condition::Is(Flag::Camouflaged)],
    },
    MoodRule {
        label: "Overwhelmed",
        when: &[Condition::Above(Attribute::Chaos, 80)],
    },
    MoodRule {
        label: "Happy",
        when: &[Condition::Above(Attribute::Happiness, 75)],
    },
    MoodRule {
        label: "Sleepy",
        when: &[Condition::Below(Attribute::Energy, 20)],
    },
    MoodRule {
        label: "Emotional",
        when: &[Condition::Above(Attribute::EmotionalIntensity, 85)],
    },
    MoodRule {
        label: "Anxious",
        when: &[Condition::Above(Attribute::Chaos, 50)],
    },
    MoodRule {
        label: "Content",
        when: &[],
    },
];

const EVOLUTION: &[Condition] = &[
    Condition::Above(Attribute::Intelligence, 90),
    Condition::Above(Attribute::ColorChanges, 15),
    Condition::Above(Attribute::FeelingsKnown, 8),
];

pub(crate) static PROFILE: SpeciesProfile = SpeciesProfile {
    species: zoo_types::Species::Octopus,
    pet_id: "emoocto",
    evolution_name: "PsychicOcto",
    initial: Vitals {
        happiness: 50,
        energy: 65,
        chaos: 30,
    },
    pet: Deltas::new(5, 0, 0),
    feed: Deltas::new(0, 10, 0),
    poke: Deltas::new(-5, 0, 15),
    sing: Deltas::new(0, 0, -10),
    guard: Some(SleepGuard {
        while_flag: Flag::Inking,
        wake_action: Action::Sing,
        ignore_percent: 70,
        placeholder: "*hides behind a cloud of ink* ...",
    }),
    moods: MOODS,
    evolution: EVOLUTION,
    resettable: false,
};

const HAPPY_THOUGHTS: &[&str] = &[
    "Today is the best day under the sea!",
    "All eight arms waving with joy!",
    "I feel like dancing on the ocean floor!",
    "Everything is so colorful and bright today!",
    "I could hug everyone with all my arms at once!",
];

const SAD_THOUGHTS: &[&str] = &[
    "The ocean feels so vast and lonely sometimes...",
    "*sighs with all eight arms*",
    "I miss my coral reef friends...",
    "The water feels extra cold today...",
    "Sometimes I just want to hide in my little cave...",
];

const CURIOUS_THOUGHTS: &[&str] = &[
    "I wonder what's in that shiny jar?",
    "So many interesting things to investigate today!",
    "What would happen if I tried opening this with three arms at once?",
    "The humans are fascinating creatures...",
    "I want to learn everything about everything!",
];

const NERVOUS_THOUGHTS: &[&str] = &[
    "Is that a predator? Should I hide?",
    "My suckers are tingling... something's not right.",
    "Maybe I should camouflage just to be safe...",
    "I feel like I'm being watched...",
    "My ink sac is getting twitchy...",
];

const EXCITED_THOUGHTS: &[&str] = &[
    "Oh! Oh! Oh! Something amazing is happening!",
    "I can barely contain all this energy in eight arms!",
    "Look at that! And that! And THAT!",
    "This is the most thrilling moment of my entire octopus life!",
    "I'm changing colors so fast, I must look like a disco ball!",
];

const THOUGHTFUL_THOUGHTS: &[&str] = &[
    "The mysteries of the deep are endless...",
    "If I had three brains instead of nine, would I think differently?",
    "There's a pattern to how the currents move...",
    "I've solved this puzzle box 27 different ways now.",
    "The relationship between water pressure and arm flexibility is fascinating...",
];

const CAMOUFLAGE_THOUGHTS: &[&str] = &[
    "You can't see me... I'm just part of the background now...",
    "Blending in with my surroundings... perfect disguise...",
    "My cells are changing color to match what's around me...",
    "This is my special talent - disappearing in plain sight!",
    "I can become almost invisible when I need to...",
];

const INK_THOUGHTS: &[&str] = &[
    "INK CLOUD DEFENSE ACTIVATED! RETREAT!",
    "Can't see me through all this ink! Making my escape!",
    "That was too stressful! Ink and swim away!",
    "Needed an emergency exit strategy! Ink deployed!",
    "When in doubt, release the ink and scoot out!",
];

const PSYCHIC_THOUGHTS: &[&str] = &[
    "My mind has expanded beyond the confines of the ocean...",
    "I've mastered the art of emotional intelligence across species...",
    "With great cognition comes great emotional depth...",
    "I can now process feelings in ways no other octopus can...",
    "The emotional spectrum is my playground now.",
];

pub(crate) fn initial_traits() -> OctopusTraits {
    let feeling_history = BTreeMap::from([
        (Feeling::Happy, 10),
        (Feeling::Sad, 5),
        (Feeling::Curious, 15),
        (Feeling::Nervous, 8),
        (Feeling::Excited, 7),
    ]);
    OctopusTraits {
        emotional_intensity: 70,
        intelligence_level: 85,
        is_inking: false,
        is_camouflaged: false,
        feeling: Feeling::Curious,
        feeling_history,
        current_color: String::from("Blue"),
        color_change_count: 0,
        collected_items: Vec::new(),
    }
}

pub(crate) fn react(state: &mut PetState, reaction: &mut Reaction<'_>) {
    reaction.deltas.apply(state);
    let SpeciesTraits::Octopus(octo) = &mut state.traits else {
        return;
    };
    let dice = &mut *reaction.dice;

    match reaction.action {
        Action::Pet => {
            octo.is_camouflaged = false;
            bump(&mut octo.emotional_intensity, 3);
            let feeling = if state.happiness > 75 {
                Feeling::Happy
            } else {
                Feeling::Playful
            };
            feel(octo, feeling);
        }
        Action::Feed => {
            if dice.roll(TRINKET_PERCENT) && push_capped(&mut octo.collected_items, pick(dice, TRINKETS)) {
                bump(&mut octo.intelligence_level, 2);
                tracing::debug!(items = octo.collected_items.len(), "octopus found a trinket");
            }
            feel(octo, Feeling::Excited);
        }
        Action::Poke => {
            bump(&mut octo.emotional_intensity, 10);
            let overflow = state.chaos > MAX_LEVEL;
            if overflow || state.chaos > INK_CHAOS {
                if !octo.is_inking {
                    octo.is_inking = true;
                    tracing::info!(chaos = state.chaos, "octopus released ink");
                    reaction.events.push(PetEventKind::Inked {
                        chaos: state.chaos.min(MAX_LEVEL),
                    });
                }
            } else if dice.roll(CAMOUFLAGE_PERCENT) {
                octo.is_camouflaged = true;
            }
            feel(octo, if overflow { Feeling::Furious } else { Feeling::Nervous });
        }
        Action::Sing => {
            octo.is_inking = false;
            bump(&mut octo.emotional_intensity, -5);
            let feeling = if octo.intelligence_level > PONDERING_INTELLIGENCE {
                Feeling::Thoughtful
            } else {
                Feeling::Calm
            };
            feel(octo, feeling);
        }
        Action::Message => {
            if let Some(text) = reaction.message {
                let text = text.to_lowercase();
                let feeling = if text.contains("happy") {
                    Feeling::Happy
                } else if text.contains("sad") {
                    Feeling::Sad
                } else if text.contains('?') {
                    bump(&mut octo.intelligence_level, 1);
                    Feeling::Curious
                } else {
                    Feeling::Thoughtful
                };
                feel(octo, feeling);
            }
        }
    }
}

/// Move to a feeling: record it and shift colour if it changes.
fn feel(octo: &mut OctopusTraits, feeling: Feeling) {
    octo.feeling = feeling;
    let seen = octo.feeling_history.entry(feeling).or_insert(0);
    *seen = seen.saturating_add(1);
    let colour = feeling.colour();
    if octo.current_color != colour {
        colour.clone_into(&mut octo.current_color);
        octo.color_change_count = octo.color_change_count.saturating_add(1);
    }
}

pub(crate) fn thought(state: &PetState, dice: &mut dyn RandomSource) -> String {
    let SpeciesTraits::Octopus(octo) = &state.traits else {
        return pick(dice, CURIOUS_THOUGHTS).to_owned();
    };

    let table = if octo.is_inking {
        INK_THOUGHTS
    } else if octo.is_camouflaged {
        CAMOUFLAGE_THOUGHTS
    } else if state.is_evolved {
        PSYCHIC_THOUGHTS
    } else {
        match octo.feeling {
            Feeling::Happy => HAPPY_THOUGHTS,
            Feeling::Sad => SAD_THOUGHTS,
            Feeling::Nervous => NERVOUS_THOUGHTS,
            Feeling::Excited => EXCITED_THOUGHTS,
            Feeling::Thoughtful => THOUGHTFUL_THOUGHTS,
            Feeling::Curious
            | Feeling::Furious
            | Feeling::Calm
            | Feeling::Playful => CURIOUS_THOUGHTS,
        }
    };
    let mut thought = pick(dice, table).to_owned();

    let visible = !octo.is_inking && !octo.is_camouflaged;
    if visible && dice.roll(30) {
        thought.push_str(" *skin shifts to a bright ");
        thought.push_str(&octo.current_color);
        thought.push('*');
    }
    if !octo.collected_items.is_empty() && dice.roll(20) {
        let item = pick_item(&octo.collected_items, dice);
        thought.push_str(" *glances at my precious ");
        thought.push_str(item);
        thought.push('*');
    }
    thought
}

fn pick_item<'a>(items: &'a [String], dice: &mut dyn RandomSource) -> &'a str {
    items.get(dice.pick(items.len())).map_or("", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feeling_shifts_colour_once() {
        let mut octo = initial_traits();
        feel(&mut octo, Feeling::Happy);
        assert_eq!(octo.current_color, "Yellow");
        assert_eq!(octo.color_change_count, 1);
        feel(&mut octo, Feeling::Happy);
        assert_eq!(octo.color_change_count, 1);
        assert_eq!(octo.feeling_history.get(&Feeling::Happy), Some(&12));
    }

    #[test]
    fn sad_keeps_the_starting_colour() {
        let mut octo = initial_traits();
        feel(&mut octo, Feeling::Sad);
        assert_eq!(octo.current_color, "Blue");
        assert_eq!(octo.color_change_count, 0);
    }
}
