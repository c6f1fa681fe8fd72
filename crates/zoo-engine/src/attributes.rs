//! Uniform read access to pet attributes, plus bounding.
//!
//! Species rules are written against [`Attribute`] and [`Flag`] instead of
//! concrete struct fields, so one rule evaluator serves every species.
//! Reading an attribute the species does not have yields `None`, and any
//! condition on it is false.

use zoo_types::{PetState, SpeciesTraits};

/// Lower bound of every bounded attribute.
pub const MIN_LEVEL: i32 = 0;

/// Upper bound of every bounded attribute.
pub const MAX_LEVEL: i32 = 100;

/// Maximum length of capped collections (tricks, hoard, trinkets).
pub const COLLECTION_CAP: usize = 10;

/// A numeric attribute a rule can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// Shared happiness.
    Happiness,
    /// Shared energy.
    Energy,
    /// Shared chaos.
    Chaos,
    /// Turtle stress.
    Stress,
    /// Turtle age.
    Age,
    /// Dino growth.
    Growth,
    /// Dino playfulness.
    Playfulness,
    /// Dino cuteness.
    Cuteness,
    /// Number of tricks the dino knows.
    TricksKnown,
    /// Dragon fire breath intensity.
    FireBreath,
    /// Dragon rage.
    Rage,
    /// Number of items in the dragon's hoard.
    HoardSize,
    /// Octopus emotional intensity.
    EmotionalIntensity,
    /// Octopus intelligence.
    Intelligence,
    /// Number of octopus colour changes.
    ColorChanges,
    /// Number of distinct feelings the octopus has felt.
    FeelingsKnown,
    /// Bunny calmness.
    Calmness,
}

/// A boolean sub-state a rule can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// Dino is asleep.
    Napping,
    /// Turtle is hiding in its shell.
    InShell,
    /// Octopus released ink.
    Inking,
    /// Octopus is blended into the background.
    Camouflaged,
    /// Dragon is breathing fire.
    BreathingFire,
    /// Pet has evolved.
    Evolved,
    /// Turtle is overwhelmed by chaos.
    Overwhelmed,
}

/// Read a numeric attribute. `None` if the species lacks it.
pub fn read(state: &PetState, attribute: Attribute) -> Option<i32> {
    match (attribute, &state.traits) {
        (Attribute::Happiness, _) => Some(state.happiness),
        (Attribute::Energy, _) => Some(state.energy),
        (Attribute::Chaos, _) => Some(state.chaos),
        (Attribute::Stress, SpeciesTraits::Turtle(t)) => Some(t.stress_level),
        (Attribute::Age, SpeciesTraits::Turtle(t)) => Some(count(t.age)),
        (Attribute::Growth, SpeciesTraits::Dino(d)) => Some(d.growth),
        (Attribute::Playfulness, SpeciesTraits::Dino(d)) => Some(d.playfulness_level),
        (Attribute::Cuteness, SpeciesTraits::Dino(d)) => Some(d.cuteness_factor),
        (Attribute::TricksKnown, SpeciesTraits::Dino(d)) => Some(len(d.known_tricks.len())),
        (Attribute::FireBreath, SpeciesTraits::Dragon(d)) => Some(d.fire_breath_intensity),
        (Attribute::Rage, SpeciesTraits::Dragon(d)) => Some(d.rage_level),
        (Attribute::HoardSize, SpeciesTraits::Dragon(d)) => Some(len(d.hoard.len())),
        (Attribute::EmotionalIntensity, SpeciesTraits::Octopus(o)) => {
            Some(o.emotional_intensity)
        }
        (Attribute::Intelligence, SpeciesTraits::Octopus(o)) => Some(o.intelligence_level),
        (Attribute::ColorChanges, SpeciesTraits::Octopus(o)) => Some(count(o.color_change_count)),
        (Attribute::FeelingsKnown, SpeciesTraits::Octopus(o)) => Some(len(
            o.feeling_history.values().filter(|n| **n > 0).count(),
        )),
        (Attribute::Calmness, SpeciesTraits::Bunny(b)) => Some(b.calmness),
        _ => None,
    }
}

/// Read a boolean sub-state. `false` if the species lacks it.
pub const fn flag(state: &PetState, flag: Flag) -> bool {
    match (flag, &state.traits) {
        (Flag::Evolved, _) => state.is_evolved,
        (Flag::Napping, SpeciesTraits::Dino(d)) => d.is_napping,
        (Flag::InShell, SpeciesTraits::Turtle(t)) => t.is_in_shell,
        (Flag::Overwhelmed, SpeciesTraits::Turtle(t)) => t.is_overwhelmed,
        (Flag::Inking, SpeciesTraits::Octopus(o)) => o.is_inking,
        (Flag::Camouflaged, SpeciesTraits::Octopus(o)) => o.is_camouflaged,
        (Flag::BreathingFire, SpeciesTraits::Dragon(d)) => d.is_breathing_fire,
        _ => false,
    }
}

/// Clamp every bounded attribute of the snapshot to `0..=100`.
pub fn clamp_bounded(state: &mut PetState) {
    clamp(&mut state.happiness);
    clamp(&mut state.energy);
    clamp(&mut state.chaos);
    match &mut state.traits {
        SpeciesTraits::Turtle(t) => clamp(&mut t.stress_level),
        SpeciesTraits::Octopus(o) => {
            clamp(&mut o.emotional_intensity);
            clamp(&mut o.intelligence_level);
        }
        SpeciesTraits::Dragon(d) => {
            clamp(&mut d.fire_breath_intensity);
            clamp(&mut d.rage_level);
        }
        SpeciesTraits::Dino(d) => {
            clamp(&mut d.playfulness_level);
            clamp(&mut d.growth);
            clamp(&mut d.cuteness_factor);
        }
        SpeciesTraits::Bunny(b) => clamp(&mut b.calmness),
    }
}

/// Whether every bounded attribute lies in `0..=100`.
pub fn is_bounded(state: &PetState) -> bool {
    let within = |v: i32| (MIN_LEVEL..=MAX_LEVEL).contains(&v);
    let shared = within(state.happiness) && within(state.energy) && within(state.chaos);
    shared
        && match &state.traits {
            SpeciesTraits::Turtle(t) => within(t.stress_level),
            SpeciesTraits::Octopus(o) => {
                within(o.emotional_intensity) && within(o.intelligence_level)
            }
            SpeciesTraits::Dragon(d) => within(d.fire_breath_intensity) && within(d.rage_level),
            SpeciesTraits::Dino(d) => {
                within(d.playfulness_level) && within(d.growth) && within(d.cuteness_factor)
            }
            SpeciesTraits::Bunny(b) => within(b.calmness),
        }
}

/// Add `delta` without overflowing. Bounds are applied later by clamping.
pub(crate) const fn bump(value: &mut i32, delta: i32) {
    *value = value.saturating_add(delta);
}

/// Insert into a capped, duplicate-free collection.
///
/// Returns `true` if the item was added.
pub(crate) fn push_capped(items: &mut Vec<String>, item: &str) -> bool {
    if items.len() >= COLLECTION_CAP || items.iter().any(|i| i == item) {
        return false;
    }
    items.push(item.to_owned());
    true
}

fn clamp(value: &mut i32) {
    *value = (*value).clamp(MIN_LEVEL, MAX_LEVEL);
}

fn count(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn len(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use zoo_types::Species;

    use super::*;
    use crate::species::initial_state;

    #[test]
    fn shared_attributes_read_for_every_species() {
        for species in Species::ALL {
            let state = initial_state(species, Utc::now());
            assert_eq!(read(&state, Attribute::Happiness), Some(state.happiness));
            assert_eq!(read(&state, Attribute::Chaos), Some(state.chaos));
        }
    }

    #[test]
    fn foreign_attributes_read_as_none() {
        let bunny = initial_state(Species::Bunny, Utc::now());
        assert_eq!(read(&bunny, Attribute::Rage), None);
        assert_eq!(read(&bunny, Attribute::Calmness), Some(0));
        assert!(!flag(&bunny, Flag::Napping));
    }

    #[test]
    fn clamp_pulls_everything_into_range() {
        let mut dino = initial_state(Species::Dino, Utc::now());
        dino.happiness = 150;
        dino.chaos = -20;
        if let SpeciesTraits::Dino(d) = &mut dino.traits {
            d.growth = 101;
            d.cuteness_factor = i32::MIN;
        }
        assert!(!is_bounded(&dino));
        clamp_bounded(&mut dino);
        assert!(is_bounded(&dino));
        assert_eq!(dino.happiness, 100);
        assert_eq!(dino.chaos, 0);
    }

    #[test]
    fn capped_collection_ignores_duplicates_and_overflow() {
        let mut items = Vec::new();
        assert!(push_capped(&mut items, "spin"));
        assert!(!push_capped(&mut items, "spin"));
        for i in 0..20 {
            push_capped(&mut items, &format!("trick-{i}"));
        }
        assert_eq!(items.len(), COLLECTION_CAP);
    }

    #[test]
    fn feelings_known_counts_distinct_entries() {
        let octo = initial_state(Species::Octopus, Utc::now());
        assert_eq!(read(&octo, Attribute::FeelingsKnown), Some(5));
    }
}
