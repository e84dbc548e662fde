//! Portal web surface.
//!
//! Serves the patient pages, a health check and static assets. Page
//! routes are wrapped by: Access log → `Cache-Control: no-store` → Handler.
//!
//! `portal_router()` returns a plain `Router` that can be mounted on any
//! axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::PageError;
pub use router::portal_router;
pub use server::{start_portal_server, PortalServer, PortalSession, ServerError};
pub use types::PortalContext;
