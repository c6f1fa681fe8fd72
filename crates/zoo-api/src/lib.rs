//! HTTP surface for a petting zoo pet service.
//!
//! Each service hosts one pet. This crate provides the Axum server that
//! exposes it:
//!
//! - **Pet endpoints** (`/pet/state`, `/pet/interact`, `/pet/reset`,
//!   `/pet/events`) backed by the pure `zoo-engine` and the `zoo-store`
//!   snapshot store
//! - **Operational endpoints** (`/pet/stats`, `/healthz`)
//!
//! # Architecture
//!
//! Handlers do read-modify-write against the store under a per-pet async
//! lock, so interactions arriving at the same process never overwrite each
//! other. Events are handed to an [`EventSink`] after the snapshot is
//! stored. Follow-ups (waking up, leaving the shell, cooling down) run as
//! spawned Tokio tasks.

pub mod error;
pub mod handlers;
pub mod router;
pub mod scheduler;
pub mod server;
pub mod sink;
pub mod state;
pub mod stats;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use scheduler::{run_follow_up, schedule_follow_ups};
pub use server::{PetServer, ServerConfig, ServerError, start_server};
pub use sink::{EventSink, NoopSink, RecordingSink};
pub use state::AppState;
pub use stats::{InteractionStats, StatsSnapshot};
