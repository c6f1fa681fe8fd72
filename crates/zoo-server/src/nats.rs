//! NATS wiring for the pet service.
//!
//! [`NatsEventSink`] publishes pet events and [`subscribe_global`] listens
//! for zoo-wide events.
//!
//! # Subject Convention
//!
//! - **Event publish:** `zoo.events.{kind}.{pet_id}` (JSON [`PetEvent`])
//! - **Global subscribe:** `zoo.global` (payload ignored)

use std::sync::Arc;

use futures::StreamExt as _;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use zoo_api::{AppState, EventSink};
use zoo_types::PetEvent;

use crate::error::StartupError;

/// Subject every pet service listens on for zoo-wide events.
pub const GLOBAL_SUBJECT: &str = "zoo.global";

/// Event sink that publishes to NATS.
///
/// Publishing is fire-and-forget: each event is sent from its own task and
/// failures are logged, never retried.
#[derive(Clone)]
pub struct NatsEventSink {
    client: async_nats::Client,
}

impl NatsEventSink {
    /// Connect to a NATS server.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError::Nats`] if the connection fails.
    pub async fn connect(url: &str) -> Result<Self, StartupError> {
        let client = async_nats::connect(url)
            .await
            .map_err(|e| StartupError::Nats {
                message: format!("failed to connect to NATS at {url}: {e}"),
            })?;
        Ok(Self { client })
    }

    /// The underlying client, shared with the global subscriber.
    pub const fn client(&self) -> &async_nats::Client {
        &self.client
    }
}

impl EventSink for NatsEventSink {
    fn publish(&self, event: &PetEvent) {
        let payload = match encode(event) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "failed to serialize event");
                return;
            }
        };
        let subject = event.subject();
        let client = self.client.clone();
        tokio::spawn(async move {
            match client.publish(subject.clone(), payload.into()).await {
                Ok(()) => debug!(subject = %subject, "event published"),
                Err(e) => warn!(subject = %subject, error = %e, "failed to publish event"),
            }
        });
    }
}

/// JSON payload for an event.
pub fn encode(event: &PetEvent) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(event)
}

/// Subscribe to [`GLOBAL_SUBJECT`] and apply each message as a zoo-wide
/// event to the hosted pet.
///
/// # Errors
///
/// Returns [`StartupError::Nats`] if the subscription fails.
pub async fn subscribe_global(
    client: &async_nats::Client,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    let mut subscriber = client
        .subscribe(GLOBAL_SUBJECT.to_owned())
        .await
        .map_err(|e| StartupError::Nats {
            message: format!("failed to subscribe to {GLOBAL_SUBJECT}: {e}"),
        })?;
    info!(subject = GLOBAL_SUBJECT, "subscribed to global events");

    Ok(tokio::spawn(async move {
        while let Some(message) = subscriber.next().await {
            debug!(subject = %message.subject, "global event received");
            if let Err(e) = state.global_event().await {
                warn!(error = %e, "failed to apply global event");
            }
        }
        warn!("global event subscription closed");
    }))
}
