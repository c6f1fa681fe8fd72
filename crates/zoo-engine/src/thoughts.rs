//! Local thought generation.
//!
//! Each species keeps phrase tables keyed by its sub-state and mood; a
//! thought is one phrase from the table that fits, sometimes with a short
//! flourish about a trick or a colour.

use zoo_types::{PetState, SpeciesTraits};

use crate::random::RandomSource;
use crate::species::{bunny, dino, dragon, octopus, turtle};

/// Said when a table is somehow empty.
const SILENCE: &str = "...";

/// Generate a thought that fits the pet's current state.
pub fn generate_thought(state: &PetState, dice: &mut impl RandomSource) -> String {
    thought_for(state, dice)
}

pub(crate) fn thought_for(state: &PetState, dice: &mut dyn RandomSource) -> String {
    match &state.traits {
        SpeciesTraits::Turtle(_) => turtle::thought(state, dice),
        SpeciesTraits::Octopus(_) => octopus::thought(state, dice),
        SpeciesTraits::Dragon(_) => dragon::thought(state, dice),
        SpeciesTraits::Dino(_) => dino::thought(state, dice),
        SpeciesTraits::Bunny(_) => bunny::thought(state, dice),
    }
}

/// Pick one entry from a table.
pub(crate) fn pick<'t>(dice: &mut dyn RandomSource, table: &[&'t str]) -> &'t str {
    table.get(dice.pick(table.len())).copied().unwrap_or(SILENCE)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use zoo_types::Species;

    use super::*;
    use crate::random::{FixedSource, RngSource};
    use crate::species::initial_state;

    #[test]
    fn every_species_has_something_to_say() {
        let mut dice = RngSource::new(<rand::rngs::SmallRng as rand::SeedableRng>::seed_from_u64(3));
        for species in Species::ALL {
            let state = initial_state(species, Utc::now());
            let thought = generate_thought(&state, &mut dice);
            assert!(!thought.is_empty(), "{species}");
            assert_ne!(thought, SILENCE);
        }
    }

    #[test]
    fn turtle_thinks_from_its_table() {
        let state = initial_state(Species::Turtle, Utc::now());
        let thought = generate_thought(&state, &mut FixedSource::never());
        assert_eq!(thought, "Just enjoying the sun...");
    }

    #[test]
    fn shy_turtle_thinks_from_the_shell() {
        let mut state = initial_state(Species::Turtle, Utc::now());
        if let SpeciesTraits::Turtle(t) = &mut state.traits {
            t.is_in_shell = true;
        }
        let thought = generate_thought(&state, &mut FixedSource::never());
        assert!(turtle::SHELL_THOUGHTS.contains(&thought.as_str()));
    }

    #[test]
    fn empty_table_falls_back_to_silence() {
        assert_eq!(pick(&mut FixedSource::always(), &[]), SILENCE);
    }
}
