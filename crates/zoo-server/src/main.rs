//! Pet service binary for the petting zoo.
//!
//! One process hosts one pet. It loads configuration, connects the state
//! store and the event bus, and serves the pet API until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `zoo-config.yaml`
//! 3. Connect to `Dragonfly`, falling back to in-memory state
//! 4. Connect to NATS for event publishing, falling back to no publishing
//! 5. Subscribe to zoo-wide events
//! 6. Serve HTTP

mod config;
mod error;
mod nats;

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use zoo_api::{AppState, EventSink, NoopSink, ServerConfig};
use zoo_store::{DragonflyPool, StateStore};

use crate::config::ZooConfig;
use crate::error::StartupError;
use crate::nats::NatsEventSink;

/// Application entry point for a pet service.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("zoo-server starting");

    // 2. Load configuration.
    let config = load_config()?;
    let pet_id = config.pet.pet_id();
    let species = config.pet.species;
    info!(%pet_id, %species, port = config.server.port, "Configuration loaded");

    // 3. State store.
    let store = connect_store(&config.infrastructure.dragonfly_url).await;

    // 4. Event sink.
    let nats = connect_nats(&config.infrastructure.nats_url).await;
    let sink: Arc<dyn EventSink> = match &nats {
        Some(sink) => Arc::new(sink.clone()),
        None => Arc::new(NoopSink),
    };

    let state = Arc::new(
        AppState::new(store, pet_id, species)
            .with_sink(sink)
            .with_delays(config.follow_ups.delays()),
    );

    // 5. Zoo-wide events.
    let _global_events = match &nats {
        Some(sink) => Some(nats::subscribe_global(sink.client(), Arc::clone(&state)).await?),
        None => None,
    };

    // 6. Serve.
    let server_config = ServerConfig {
        host: config.server.host,
        port: config.server.port,
    };
    zoo_api::start_server(&server_config, state)
        .await
        .map_err(StartupError::from)?;

    info!("zoo-server stopped");
    Ok(())
}

/// Load configuration from `zoo-config.yaml`, or defaults if the file does
/// not exist. Environment overrides apply either way.
fn load_config() -> Result<ZooConfig, StartupError> {
    let config_path = Path::new("zoo-config.yaml");
    if config_path.exists() {
        Ok(ZooConfig::from_file(config_path)?)
    } else {
        info!("Config file not found, using defaults");
        let mut config = ZooConfig::default();
        config.apply_env_overrides()?;
        Ok(config)
    }
}

/// Connect to `Dragonfly`, or keep state in memory if no URL is set or the
/// connection fails.
async fn connect_store(url: &str) -> StateStore {
    if url.is_empty() {
        info!("No Dragonfly URL configured, keeping pet state in memory");
        return StateStore::in_memory();
    }
    match DragonflyPool::connect(url).await {
        Ok(pool) => StateStore::Dragonfly(pool),
        Err(e) => {
            warn!(url, error = %e, "Dragonfly unavailable, keeping pet state in memory");
            StateStore::in_memory()
        }
    }
}

/// Connect to NATS, or run without publishing if no URL is set or the
/// connection fails.
async fn connect_nats(url: &str) -> Option<NatsEventSink> {
    if url.is_empty() {
        info!("No NATS URL configured, events will not be published");
        return None;
    }
    match NatsEventSink::connect(url).await {
        Ok(sink) => {
            info!(url, "NATS event sink connected");
            Some(sink)
        }
        Err(e) => {
            warn!(error = %e, "NATS unavailable, events will not be published");
            None
        }
    }
}
