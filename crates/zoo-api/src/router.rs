//! Axum router construction for the pet API.
//!
//! Assembles all routes into a single [`Router`] with CORS enabled for the
//! zoo frontend and request tracing.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for one pet service.
///
/// The router includes:
/// - `GET /pet/state` -- current snapshot
/// - `POST /pet/interact` -- apply an action
/// - `POST /pet/reset` -- restore defaults
/// - `POST /pet/events` -- zoo-wide event
/// - `GET /pet/stats` -- interaction counters
/// - `GET /healthz` -- store health
///
/// CORS allows any origin; the frontend is served from elsewhere.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/pet/state", get(handlers::get_state))
        .route("/pet/interact", post(handlers::interact))
        .route("/pet/reset", post(handlers::reset))
        .route("/pet/events", post(handlers::global_event))
        .route("/pet/stats", get(handlers::stats))
        .route("/healthz", get(handlers::healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
