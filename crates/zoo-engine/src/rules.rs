//! Declarative conditions for mood derivation and evolution.
//!
//! A species' mood table is an ordered list of [`MoodRule`]s; the first rule
//! whose conditions all hold names the mood, and a rule with no conditions
//! is the fallback. Evolution predicates are a plain condition list.

use zoo_types::PetState;

use crate::attributes::{self, Attribute, Flag};

/// One test against a pet snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Attribute strictly greater than the threshold.
    Above(Attribute, i32),
    /// Attribute strictly less than the threshold.
    Below(Attribute, i32),
    /// Attribute greater than or equal to the threshold.
    AtLeast(Attribute, i32),
    /// Sub-state flag is set.
    Is(Flag),
}

impl Condition {
    /// Evaluate against a snapshot. Conditions on missing attributes are false.
    pub fn holds(self, state: &PetState) -> bool {
        match self {
            Self::Above(attr, threshold) => {
                attributes::read(state, attr).is_some_and(|v| v > threshold)
            }
            Self::Below(attr, threshold) => {
                attributes::read(state, attr).is_some_and(|v| v < threshold)
            }
            Self::AtLeast(attr, threshold) => {
                attributes::read(state, attr).is_some_and(|v| v >= threshold)
            }
            Self::Is(f) => attributes::flag(state, f),
        }
    }
}

/// A mood label with the conditions that select it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodRule {
    /// Label stored in `mood` when the rule matches.
    pub label: &'static str,
    /// All must hold. Empty means always.
    pub when: &'static [Condition],
}

/// Whether every condition holds.
pub fn all_hold(conditions: &[Condition], state: &PetState) -> bool {
    conditions.iter().all(|c| c.holds(state))
}

/// Label of the first matching rule, or `None` if nothing matches.
pub fn first_match(rules: &[MoodRule], state: &PetState) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| all_hold(rule.when, state))
        .map(|rule| rule.label)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use zoo_types::Species;

    use super::*;
    use crate::species::initial_state;

    const RULES: &[MoodRule] = &[
        MoodRule {
            label: "Happy",
            when: &[Condition::Above(Attribute::Happiness, 70)],
        },
        MoodRule {
            label: "Tired",
            when: &[Condition::Below(Attribute::Energy, 30)],
        },
        MoodRule {
            label: "Neutral",
            when: &[],
        },
    ];

    #[test]
    fn first_matching_rule_wins() {
        let mut state = initial_state(Species::Bunny, Utc::now());
        state.happiness = 90;
        state.energy = 10;
        assert_eq!(first_match(RULES, &state), Some("Happy"));
        state.happiness = 50;
        assert_eq!(first_match(RULES, &state), Some("Tired"));
        state.energy = 50;
        assert_eq!(first_match(RULES, &state), Some("Neutral"));
    }

    #[test]
    fn thresholds_are_strict_except_at_least() {
        let mut state = initial_state(Species::Bunny, Utc::now());
        state.happiness = 90;
        assert!(!Condition::Above(Attribute::Happiness, 90).holds(&state));
        assert!(Condition::AtLeast(Attribute::Happiness, 90).holds(&state));
        assert!(!Condition::Below(Attribute::Happiness, 90).holds(&state));
    }

    #[test]
    fn missing_attribute_never_holds() {
        let state = initial_state(Species::Bunny, Utc::now());
        assert!(!Condition::Below(Attribute::Rage, 1000).holds(&state));
        assert!(!Condition::Is(Flag::Napping).holds(&state));
    }
}
