pub mod backend; // Managed backend client and resource handles
pub mod config;
pub mod datetime;
pub mod pages; // Server-rendered HTML
pub mod records; // Patient, user and appointment records
pub mod roster;
pub mod validation;
pub mod web; // Router, handlers, server lifecycle

use axum::Router;
use tracing_subscriber::EnvFilter;

use crate::backend::{Backend, BackendError};
use crate::config::{ConfigError, PortalConfig};
use crate::records::BackendRecordStore;
use crate::roster::Roster;
use crate::web::{PortalContext, ServerError};

/// Startup and runtime failures of the portal process.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(#[source] std::io::Error),
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Wire the backend client, record store and roster into a router.
pub fn build_portal(config: &PortalConfig) -> Result<Router, PortalError> {
    let backend = Backend::new(&config.backend)?;
    let store = BackendRecordStore::new(backend, &config.backend);
    let ctx = PortalContext::new(store, Roster::builtin(), config.display_offset);
    Ok(web::portal_router(ctx, &config.assets_dir))
}

/// Load configuration, serve the portal until ctrl-c, then drain.
pub async fn run() -> Result<(), PortalError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = PortalConfig::from_env()?;
    let app = build_portal(&config)?;

    let mut server = web::start_portal_server(app, config.addr).await?;
    tracing::info!(addr = %server.session.server_addr, "Portal listening");

    let signal = tokio::signal::ctrl_c().await;
    server.shutdown();
    server.wait().await;
    signal.map_err(PortalError::Signal)
}
