//! Integration tests for the pet API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server, backed by the in-memory store.

#![allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use zoo_api::router::build_router;
use zoo_api::{AppState, RecordingSink};
use zoo_store::StateStore;
use zoo_types::{PetEventKind, PetId, Species, SpeciesTraits};

fn make_state(pet_id: &str, species: Species) -> Arc<AppState> {
    Arc::new(AppState::new(
        StateStore::in_memory(),
        PetId::from(pet_id),
        species,
    ))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn interact_request(body: &str) -> Request<Body> {
    Request::post("/pet/interact")
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn interact(state: &Arc<AppState>, body: &str) -> (StatusCode, Value) {
    let router = build_router(Arc::clone(state));
    let response = router.oneshot(interact_request(body)).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

#[tokio::test]
async fn get_state_creates_defaults() {
    let state = make_state("chillturtle", Species::Turtle);
    let router = build_router(Arc::clone(&state));

    let response = router
        .oneshot(Request::get("/pet/state").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["mood"], "Calm");
    assert_eq!(json["happiness"], 60);
    assert_eq!(json["traits"]["species"], "turtle");
    assert!(json["lastMessage"].is_string());

    // The display thought is not persisted.
    let stored = state.store.get(&state.pet_id).await.unwrap().unwrap();
    assert_eq!(stored.last_message, None);
}

#[tokio::test]
async fn feed_updates_and_persists() {
    let state = make_state("babydino", Species::Dino);
    let (status, json) = interact(&state, r#"{"action":"feed"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["energy"], 80);
    assert_eq!(json["traits"]["growth"], 13);

    let stored = state.store.get(&state.pet_id).await.unwrap().unwrap();
    assert_eq!(stored.energy, 80);
    assert_eq!(state.stats.snapshot().interactions, 1);
}

#[tokio::test]
async fn message_sets_last_message() {
    let state = make_state("bouncybun", Species::Bunny);
    let (status, json) = interact(&state, r#"{"action":"message","message":"hello"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["lastMessage"], "hello");
    assert_eq!(json["happiness"], 50);
}

#[tokio::test]
async fn invalid_action_is_rejected_without_mutation() {
    let state = make_state("bouncybun", Species::Bunny);
    let before = state.load_pet().await.unwrap();

    let (status, json) = interact(&state, r#"{"action":"dance"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert_eq!(json["error"], "unknown action: dance");

    let after = state.store.get(&state.pet_id).await.unwrap().unwrap();
    assert_eq!(after, before);
    assert_eq!(state.stats.snapshot().rejected, 1);
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let state = make_state("bouncybun", Species::Bunny);
    let (status, json) = interact(&state, r#"{"verb":"feed"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn events_reach_the_sink() {
    let sink = Arc::new(RecordingSink::new());
    let state = Arc::new(
        AppState::new(
            StateStore::in_memory(),
            PetId::from("chillturtle"),
            Species::Turtle,
        )
        .with_sink(Arc::clone(&sink) as Arc<dyn zoo_api::EventSink>),
    );

    // Stress starts at 10 and each poke adds 5; the 13th crosses 70.
    for _ in 0..13 {
        let (status, _) = interact(&state, r#"{"action":"poke"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, PetEventKind::ShellRetreat { stress: 75 });
    assert_eq!(events[0].pet_id, PetId::from("chillturtle"));
    assert_eq!(state.stats.snapshot().events, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_interactions_are_all_applied() {
    const REQUESTS: u32 = 20;
    let state = make_state("chillturtle", Species::Turtle);
    let router = build_router(Arc::clone(&state));

    let mut handles = Vec::new();
    for _ in 0..REQUESTS {
        let router = router.clone();
        handles.push(tokio::spawn(async move {
            router
                .oneshot(interact_request(r#"{"action":"pet"}"#))
                .await
                .unwrap()
                .status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let stored = state.store.get(&state.pet_id).await.unwrap().unwrap();
    let SpeciesTraits::Turtle(turtle) = &stored.traits else {
        panic!("expected turtle traits");
    };
    assert_eq!(turtle.interaction_count, REQUESTS);
    assert_eq!(turtle.age, 17);
}

#[tokio::test]
async fn bunny_reset_restores_defaults() {
    let state = make_state("bouncybun", Species::Bunny);
    let (_, poked) = interact(&state, r#"{"action":"poke"}"#).await;
    assert_eq!(poked["happiness"], 45);

    let router = build_router(Arc::clone(&state));
    let response = router
        .oneshot(Request::post("/pet/reset").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["happiness"], 50);
    assert_eq!(json["mood"], "Neutral");

    let stored = state.store.get(&state.pet_id).await.unwrap().unwrap();
    assert_eq!(stored.happiness, 50);
}

#[tokio::test]
async fn dragon_reset_is_refused() {
    let state = make_state("chaosdragon", Species::Dragon);
    let router = build_router(state);
    let response = router
        .oneshot(Request::post("/pet/reset").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn global_event_stamps_last_event() {
    let state = make_state("babydino", Species::Dino);
    let router = build_router(Arc::clone(&state));
    let response = router
        .oneshot(Request::post("/pet/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert!(json["lastEvent"].is_string());
    assert_eq!(json["chaos"], 43);
}

#[tokio::test]
async fn stats_and_health_report_the_pet() {
    let state = make_state("emoocto", Species::Octopus);
    interact(&state, r#"{"action":"pet"}"#).await;
    interact(&state, r#"{"action":"juggle"}"#).await;

    let router = build_router(Arc::clone(&state));
    let response = router
        .clone()
        .oneshot(Request::get("/pet/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["petId"], "emoocto");
    assert_eq!(json["species"], "octopus");
    assert_eq!(json["backend"], "memory");
    assert_eq!(json["interactions"], 1);
    assert_eq!(json["rejected"], 1);

    let response = router
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn silent_observer_leaves_counters_alone() {
    let state = Arc::new(
        AppState::new(
            StateStore::in_memory(),
            PetId::from("bouncybun"),
            Species::Bunny,
        )
        .with_observer(Arc::new(zoo_engine::NoOpObserver)),
    );
    let (status, _) = interact(&state, r#"{"action":"pet"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.stats.snapshot().interactions, 0);
}
