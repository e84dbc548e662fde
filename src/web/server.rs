//! Portal server lifecycle: bind, serve in the background, shut down.
//!
//! bind → spawn background task → return handle with shutdown channel.
//! The caller decides when to stop (ctrl-c in the binary, explicit
//! `shutdown()` in tests).

use std::io;
use std::net::SocketAddr;

use axum::Router;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind portal server on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("Failed to get server address: {0}")]
    LocalAddr(#[source] io::Error),
}

/// Metadata for a running portal server.
#[derive(Debug, Clone)]
pub struct PortalSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running portal server.
pub struct PortalServer {
    pub session: PortalSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl PortalServer {
    /// Signal a graceful shutdown. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Portal server shutdown signal sent");
        }
    }

    /// Wait until the server task has finished draining connections.
    pub async fn wait(mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::error!("Portal server task failed: {e}");
            }
        }
    }
}

/// Bind `addr` and serve `app` on a background task.
///
/// Port 0 picks an ephemeral port; the chosen one is reported in the
/// returned session.
pub async fn start_portal_server(app: Router, addr: SocketAddr) -> Result<PortalServer, ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

    let session = PortalSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Portal server received shutdown signal");
        };

        tracing::info!(%addr, "Portal server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Portal server error: {e}");
        }

        tracing::info!("Portal server stopped");
    });

    Ok(PortalServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        handle: Some(handle),
    })
}
