//! REST endpoint handlers for the pet service.
//!
//! Every mutating handler does its read-modify-write under the pet's lock,
//! publishes events only after the new snapshot is stored, and leaves
//! delayed follow-ups to [`scheduler`](crate::scheduler).
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/pet/state` | Current snapshot with a fresh thought |
//! | `POST` | `/pet/interact` | Apply an action |
//! | `POST` | `/pet/reset` | Restore species defaults (bunny only) |
//! | `POST` | `/pet/events` | Apply a zoo-wide event |
//! | `GET` | `/pet/stats` | Interaction counters |
//! | `GET` | `/healthz` | Store health |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use zoo_engine::{Interaction, apply_action, generate_thought, reset_state};
use zoo_types::{InteractionRequest, PetState};

use crate::error::ApiError;
use crate::scheduler::schedule_follow_ups;
use crate::state::{AppState, dice};

// ---------------------------------------------------------------------------
// GET /pet/state
// ---------------------------------------------------------------------------

/// Return the pet's snapshot.
///
/// The `lastMessage` in the response is a thought generated for display
/// only; it is not written back.
pub async fn get_state(State(state): State<Arc<AppState>>) -> Result<Json<PetState>, ApiError> {
    let mut pet = {
        let _guard = state.lock_pet(&state.pet_id).await;
        state.load_pet().await?
    };
    pet.last_message = Some(generate_thought(&pet, &mut dice()));
    Ok(Json(pet))
}

// ---------------------------------------------------------------------------
// POST /pet/interact
// ---------------------------------------------------------------------------

/// Apply one action and return the next snapshot.
///
/// Unknown actions return `400` and leave the stored snapshot untouched.
/// Actions swallowed by a sleep guard are answered but not stored.
pub async fn interact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InteractionRequest>, JsonRejection>,
) -> Result<Json<PetState>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let outcome = {
        let _guard = state.lock_pet(&state.pet_id).await;
        let current = state.load_pet().await?;
        let interaction = Interaction {
            pet_id: &state.pet_id,
            action: &request.action,
            message: request.message.as_deref(),
            now: Utc::now(),
        };
        let outcome = match apply_action(&current, &interaction, &mut dice()) {
            Ok(outcome) => outcome,
            Err(e) => {
                state.observer.on_rejected(&state.pet_id, &request.action);
                return Err(e.into());
            }
        };
        if !outcome.ignored {
            state.store.set(&state.pet_id, &outcome.state).await?;
        }
        outcome
    };

    state.observer.on_outcome(&state.pet_id, &outcome);
    for event in &outcome.events {
        state.sink.publish(event);
        state.observer.on_event(event);
    }
    schedule_follow_ups(&state, &outcome.events);

    Ok(Json(outcome.state))
}

// ---------------------------------------------------------------------------
// POST /pet/reset
// ---------------------------------------------------------------------------

/// Restore species defaults. Only species that allow it; others get `400`.
pub async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<PetState>, ApiError> {
    let fresh = reset_state(state.species, Utc::now())?;
    let _guard = state.lock_pet(&state.pet_id).await;
    state.store.set(&state.pet_id, &fresh).await?;
    tracing::info!(pet_id = %state.pet_id, "pet reset");
    Ok(Json(fresh))
}

// ---------------------------------------------------------------------------
// POST /pet/events
// ---------------------------------------------------------------------------

/// Apply a zoo-wide event and return the next snapshot.
pub async fn global_event(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PetState>, ApiError> {
    Ok(Json(state.global_event().await?))
}

// ---------------------------------------------------------------------------
// GET /pet/stats
// ---------------------------------------------------------------------------

/// Interaction counters since process start.
pub async fn stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let counters = state.stats.snapshot();
    Json(serde_json::json!({
        "petId": state.pet_id,
        "species": state.species,
        "backend": state.store.backend(),
        "interactions": counters.interactions,
        "ignored": counters.ignored,
        "rejected": counters.rejected,
        "evolutions": counters.evolutions,
        "events": counters.events,
    }))
}

// ---------------------------------------------------------------------------
// GET /healthz
// ---------------------------------------------------------------------------

/// `200` when the store is reachable, `503` otherwise.
pub async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let healthy = state.store.is_healthy();
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(serde_json::json!({
            "status": if healthy { "ok" } else { "degraded" },
            "store": state.store.backend(),
            "species": state.species,
        })),
    )
}
