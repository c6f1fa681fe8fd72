//! Delayed follow-up scheduling.
//!
//! Every event that asks for a [`FollowUp`] gets its own Tokio task: sleep
//! for the configured delay, then apply the follow-up as a locked
//! read-modify-write. Request handlers never sleep.

use std::sync::Arc;

use tracing::{debug, info, warn};
use zoo_engine::{FollowUp, resolve_follow_up};
use zoo_store::StoreError;
use zoo_types::{PetEvent, PetId};

use crate::state::{AppState, dice};

/// Spawn a task for every follow-up the events ask for.
///
/// Returns the number of tasks spawned.
pub fn schedule_follow_ups(state: &Arc<AppState>, events: &[PetEvent]) -> usize {
    let mut spawned: usize = 0;
    for event in events {
        let Some(follow_up) = FollowUp::for_event(&event.kind) else {
            continue;
        };
        let delay = state.delays.delay_for(follow_up, &mut dice());
        let state = Arc::clone(state);
        let pet_id = event.pet_id.clone();
        debug!(%pet_id, %follow_up, delay_secs = delay.as_secs(), "scheduled follow-up");

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = run_follow_up(&state, &pet_id, follow_up).await {
                warn!(%pet_id, %follow_up, error = %e, "follow-up failed");
            }
        });
        spawned = spawned.saturating_add(1);
    }
    spawned
}

/// Apply one follow-up now.
///
/// Returns `true` if the snapshot changed and was written back.
pub async fn run_follow_up(
    state: &AppState,
    pet_id: &PetId,
    follow_up: FollowUp,
) -> Result<bool, StoreError> {
    let _guard = state.lock_pet(pet_id).await;
    let Some(current) = state.store.get(pet_id).await? else {
        return Ok(false);
    };
    let Some(next) = resolve_follow_up(&current, follow_up) else {
        debug!(%pet_id, %follow_up, "follow-up no longer applies");
        return Ok(false);
    };
    state.store.set(pet_id, &next).await?;
    info!(%pet_id, %follow_up, mood = %next.mood, "follow-up applied");
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use zoo_engine::FollowUpDelays;
    use zoo_store::StateStore;
    use zoo_types::{PetEventKind, PetState, Species, SpeciesTraits};

    use super::*;

    fn instant_delays() -> FollowUpDelays {
        FollowUpDelays {
            nap_min: Duration::ZERO,
            nap_max: Duration::ZERO,
            shell: Duration::ZERO,
            rage_cooldown: Duration::ZERO,
            ink: Duration::ZERO,
        }
    }

    async fn napping_dino(state: &AppState) -> PetState {
        let mut pet = state.load_pet().await.unwrap();
        if let SpeciesTraits::Dino(d) = &mut pet.traits {
            d.is_napping = true;
        }
        state.store.set(&state.pet_id, &pet).await.unwrap();
        pet
    }

    #[tokio::test]
    async fn run_follow_up_wakes_the_dino() {
        let state = AppState::new(StateStore::in_memory(), PetId::from("babydino"), Species::Dino);
        napping_dino(&state).await;

        let changed = run_follow_up(&state, &state.pet_id, FollowUp::NapWake)
            .await
            .unwrap();
        assert!(changed);

        let again = run_follow_up(&state, &state.pet_id, FollowUp::NapWake)
            .await
            .unwrap();
        assert!(!again, "second wake-up is a no-op");
    }

    #[tokio::test]
    async fn missing_pet_skips_the_follow_up() {
        let state = AppState::new(StateStore::in_memory(), PetId::from("ghost"), Species::Dino);
        let changed = run_follow_up(&state, &state.pet_id, FollowUp::NapWake)
            .await
            .unwrap();
        assert!(!changed);
    }

    #[tokio::test]
    async fn scheduled_follow_up_runs_in_the_background() {
        let state = Arc::new(
            AppState::new(StateStore::in_memory(), PetId::from("babydino"), Species::Dino)
                .with_delays(instant_delays()),
        );
        let pet = napping_dino(&state).await;
        let events = vec![
            PetEvent::new(state.pet_id.clone(), Species::Dino, PetEventKind::NapStarted, Utc::now()),
            PetEvent::new(
                state.pet_id.clone(),
                Species::Dino,
                PetEventKind::Tantrum { chaos: 62 },
                Utc::now(),
            ),
        ];

        assert_eq!(schedule_follow_ups(&state, &events), 1);
        tokio::time::sleep(Duration::from_millis(50)).await;

        let stored = state.store.get(&state.pet_id).await.unwrap().unwrap();
        assert_ne!(stored, pet);
        assert!(matches!(&stored.traits, SpeciesTraits::Dino(d) if !d.is_napping));
    }
}
