//! Serving one pet over HTTP.
//!
//! [`PetServer::bind`] claims the listening socket up front so a taken port
//! fails startup before any request is accepted. [`PetServer::serve_until`]
//! then runs until the given shutdown future resolves, and
//! [`start_server`] wires that to `Ctrl-C` for the binary.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use zoo_types::{PetId, Species};

use crate::router::build_router;
use crate::state::AppState;
use crate::stats::InteractionStats;

/// Where the pet service listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host name or address (e.g. `0.0.0.0` or `localhost`).
    pub host: String,
    /// The TCP port to listen on. `0` picks a free port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
        }
    }
}

/// A bound, not yet serving, pet service.
pub struct PetServer {
    listener: TcpListener,
    addr: SocketAddr,
    state: Arc<AppState>,
}

impl PetServer {
    /// Bind the listening socket for `state`'s pet.
    ///
    /// Host names are resolved, so compose service names work as hosts.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the host does not resolve or the
    /// port cannot be claimed.
    pub async fn bind(config: &ServerConfig, state: Arc<AppState>) -> Result<Self, ServerError> {
        let target = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind((config.host.as_str(), config.port))
            .await
            .map_err(|e| ServerError::Bind(format!("{target}: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ServerError::Bind(format!("{target}: {e}")))?;
        Ok(Self {
            listener,
            addr,
            state,
        })
    }

    /// The address actually bound.
    pub const fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serve the pet until `shutdown` resolves, then drain open requests.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Serve`] on a fatal I/O error.
    pub async fn serve_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Self {
            listener,
            addr,
            state,
        } = self;
        let pet_id = state.pet_id.clone();
        let species = state.species;
        let stats = Arc::clone(&state.stats);

        info!(%addr, %pet_id, %species, "pet is receiving visitors");
        axum::serve(listener, build_router(state))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        log_farewell(&pet_id, species, &stats);
        Ok(())
    }
}

/// Bind and serve the pet until `Ctrl-C`.
///
/// # Errors
///
/// Returns [`ServerError`] if binding or serving fails.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    PetServer::bind(config, state)
        .await?
        .serve_until(ctrl_c())
        .await
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

fn log_farewell(pet_id: &PetId, species: Species, stats: &InteractionStats) {
    let totals = stats.snapshot();
    info!(
        %pet_id,
        %species,
        interactions = totals.interactions,
        rejected = totals.rejected,
        evolutions = totals.evolutions,
        "pet service stopped"
    );
}

/// Errors that can occur when starting or running the pet server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}
