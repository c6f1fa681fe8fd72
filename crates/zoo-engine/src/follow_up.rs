//! Delayed follow-ups and zoo-wide events.
//!
//! Some events are only half of a transition: a dino that falls asleep wakes
//! up later, a turtle that hides comes back out. The engine names the
//! delayed half as a [`FollowUp`]; the caller decides when to run it and
//! applies it with [`resolve_follow_up`].

use std::time::Duration;

use chrono::{DateTime, Utc};
use zoo_types::{PetEventKind, PetState, SpeciesTraits};

use crate::attributes::bump;
use crate::interaction::settle;
use crate::random::RandomSource;
use crate::species::profile;

/// Chance, in percent, that a zoo-wide event wakes a napping dino.
pub const GLOBAL_WAKE_PERCENT: u32 = 20;

/// The delayed half of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FollowUp {
    /// The dino wakes from its nap, refreshed.
    NapWake,
    /// The turtle leaves its shell, calmer.
    ShellEmerge,
    /// The dragon's rage cools and the fire goes out.
    RageCooldown,
    /// The octopus' ink cloud disperses.
    InkSettle,
}

impl FollowUp {
    /// The follow-up an event asks for, if any.
    pub const fn for_event(kind: &PetEventKind) -> Option<Self> {
        match kind {
            PetEventKind::NapStarted => Some(Self::NapWake),
            PetEventKind::ShellRetreat { .. } => Some(Self::ShellEmerge),
            PetEventKind::RageSpike { .. } => Some(Self::RageCooldown),
            PetEventKind::Inked { .. } => Some(Self::InkSettle),
            PetEventKind::Evolved { .. } | PetEventKind::Tantrum { .. } => None,
        }
    }

    /// Short name for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NapWake => "nap-wake",
            Self::ShellEmerge => "shell-emerge",
            Self::RageCooldown => "rage-cooldown",
            Self::InkSettle => "ink-settle",
        }
    }
}

impl core::fmt::Display for FollowUp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long each follow-up waits before running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUpDelays {
    /// Shortest nap.
    pub nap_min: Duration,
    /// Longest nap.
    pub nap_max: Duration,
    /// Time spent in the shell.
    pub shell: Duration,
    /// Time for rage to cool.
    pub rage_cooldown: Duration,
    /// Time for ink to settle.
    pub ink: Duration,
}

impl Default for FollowUpDelays {
    fn default() -> Self {
        Self {
            nap_min: Duration::from_secs(20),
            nap_max: Duration::from_mins(1),
            shell: Duration::from_secs(30),
            rage_cooldown: Duration::from_secs(45),
            ink: Duration::from_secs(15),
        }
    }
}

impl FollowUpDelays {
    /// Delay before a follow-up runs. Naps pick a whole number of seconds
    /// between `nap_min` and `nap_max`.
    pub fn delay_for(&self, follow_up: FollowUp, dice: &mut impl RandomSource) -> Duration {
        match follow_up {
            FollowUp::NapWake => {
                let min = self.nap_min.as_secs();
                let spread = self.nap_max.as_secs().saturating_sub(min);
                let offset = usize::try_from(spread)
                    .ok()
                    .and_then(|s| s.checked_add(1))
                    .map_or(0, |choices| dice.pick(choices));
                Duration::from_secs(min.saturating_add(u64::try_from(offset).unwrap_or(0)))
            }
            FollowUp::ShellEmerge => self.shell,
            FollowUp::RageCooldown => self.rage_cooldown,
            FollowUp::InkSettle => self.ink,
        }
    }
}

/// Apply the delayed half of an event.
///
/// Returns the next snapshot, or `None` if the follow-up no longer applies
/// (the dino already woke up, the species does not match, and so on).
pub fn resolve_follow_up(state: &PetState, follow_up: FollowUp) -> Option<PetState> {
    let mut next = state.clone();
    let changed = match (follow_up, &mut next.traits) {
        (FollowUp::NapWake, SpeciesTraits::Dino(dino)) if dino.is_napping => {
            dino.is_napping = false;
            bump(&mut next.energy, 20);
            true
        }
        (FollowUp::ShellEmerge, SpeciesTraits::Turtle(turtle)) if turtle.is_in_shell => {
            turtle.is_in_shell = false;
            bump(&mut turtle.stress_level, -20);
            true
        }
        (FollowUp::RageCooldown, SpeciesTraits::Dragon(dragon)) => {
            let cooled = dragon.rage_level.saturating_sub(25).max(0);
            let changed = cooled != dragon.rage_level || dragon.is_breathing_fire;
            dragon.rage_level = cooled;
            dragon.is_breathing_fire = false;
            changed
        }
        (FollowUp::InkSettle, SpeciesTraits::Octopus(octo)) if octo.is_inking => {
            octo.is_inking = false;
            true
        }
        _ => false,
    };
    if !changed {
        return None;
    }
    settle(profile(next.species()), &mut next);
    Some(next)
}

/// Apply a zoo-wide event: stamp `last_event` and let the species react.
pub fn apply_global_event(
    state: &PetState,
    now: DateTime<Utc>,
    dice: &mut impl RandomSource,
) -> PetState {
    let mut next = state.clone();
    next.last_event = Some(now);
    match &mut next.traits {
        SpeciesTraits::Dino(dino) => {
            bump(&mut dino.playfulness_level, 5);
            bump(&mut next.chaos, 3);
            if dino.is_napping && dice.roll(GLOBAL_WAKE_PERCENT) {
                dino.is_napping = false;
                tracing::info!("baby dino woke up from global event");
            }
        }
        SpeciesTraits::Octopus(octo) => bump(&mut octo.emotional_intensity, 5),
        SpeciesTraits::Turtle(_) | SpeciesTraits::Dragon(_) | SpeciesTraits::Bunny(_) => {}
    }
    settle(profile(next.species()), &mut next);
    next
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use zoo_types::Species;

    use super::*;
    use crate::random::FixedSource;
    use crate::species::initial_state;

    #[test]
    fn events_map_to_follow_ups() {
        assert_eq!(
            FollowUp::for_event(&PetEventKind::NapStarted),
            Some(FollowUp::NapWake)
        );
        assert_eq!(
            FollowUp::for_event(&PetEventKind::Inked { chaos: 80 }),
            Some(FollowUp::InkSettle)
        );
        assert_eq!(FollowUp::for_event(&PetEventKind::Tantrum { chaos: 80 }), None);
    }

    #[test]
    fn nap_wake_refreshes_a_napping_dino() {
        let mut state = initial_state(Species::Dino, Utc::now());
        state.energy = 90;
        if let SpeciesTraits::Dino(d) = &mut state.traits {
            d.is_napping = true;
        }
        let next = resolve_follow_up(&state, FollowUp::NapWake).unwrap();
        assert_eq!(next.energy, 100);
        assert!(matches!(&next.traits, SpeciesTraits::Dino(d) if !d.is_napping));
        assert_ne!(next.mood, "Sleepy");
    }

    #[test]
    fn nap_wake_on_an_awake_dino_changes_nothing() {
        let state = initial_state(Species::Dino, Utc::now());
        assert_eq!(resolve_follow_up(&state, FollowUp::NapWake), None);
    }

    #[test]
    fn follow_up_for_another_species_is_ignored() {
        let state = initial_state(Species::Bunny, Utc::now());
        assert_eq!(resolve_follow_up(&state, FollowUp::ShellEmerge), None);
    }

    #[test]
    fn shell_emerge_calms_the_turtle() {
        let mut state = initial_state(Species::Turtle, Utc::now());
        if let SpeciesTraits::Turtle(t) = &mut state.traits {
            t.is_in_shell = true;
            t.stress_level = 75;
        }
        let next = resolve_follow_up(&state, FollowUp::ShellEmerge).unwrap();
        assert!(matches!(&next.traits, SpeciesTraits::Turtle(t) if !t.is_in_shell && t.stress_level == 55));
        assert_eq!(next.mood, "Calm");
    }

    #[test]
    fn rage_cooldown_puts_out_the_fire() {
        let mut state = initial_state(Species::Dragon, Utc::now());
        if let SpeciesTraits::Dragon(d) = &mut state.traits {
            d.rage_level = 90;
            d.is_breathing_fire = true;
        }
        let next = resolve_follow_up(&state, FollowUp::RageCooldown).unwrap();
        assert!(matches!(&next.traits, SpeciesTraits::Dragon(d) if d.rage_level == 65 && !d.is_breathing_fire));
    }

    #[test]
    fn global_event_excites_the_dino() {
        let mut state = initial_state(Species::Dino, Utc::now());
        if let SpeciesTraits::Dino(d) = &mut state.traits {
            d.is_napping = true;
        }
        let now = Utc::now();
        let next = apply_global_event(&state, now, &mut FixedSource::always());
        assert_eq!(next.last_event, Some(now));
        assert_eq!(next.chaos, 43);
        assert!(matches!(&next.traits, SpeciesTraits::Dino(d) if !d.is_napping && d.playfulness_level == 90));
    }

    #[test]
    fn global_event_only_stamps_the_bunny() {
        let state = initial_state(Species::Bunny, Utc::now());
        let now = Utc::now();
        let next = apply_global_event(&state, now, &mut FixedSource::always());
        assert_eq!(next.last_event, Some(now));
        assert_eq!(next.happiness, state.happiness);
        assert_eq!(next.mood, state.mood);
    }

    #[test]
    fn nap_delay_stays_in_range() {
        let delays = FollowUpDelays::default();
        let mut short = FixedSource::never();
        let mut long = FixedSource {
            rolls: false,
            pick: usize::MAX,
        };
        assert_eq!(delays.delay_for(FollowUp::NapWake, &mut short), Duration::from_secs(20));
        assert_eq!(delays.delay_for(FollowUp::NapWake, &mut long), Duration::from_mins(1));
        assert_eq!(delays.delay_for(FollowUp::InkSettle, &mut short), Duration::from_secs(15));
    }
}
