//! Portal router.
//!
//! Layout:
//! - `/patients/...`: HTML pages, `Cache-Control: no-store`
//! - `/health`: JSON liveness probe
//! - `/assets/...`: static files, cacheable
//!
//! Everything passes through the access log.

use std::path::Path;

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::records::RecordStore;
use crate::web::endpoints;
use crate::web::middleware;
use crate::web::types::PortalContext;

const ASSET_CACHE_CONTROL: &str = "public, max-age=3600";

/// Build the portal router.
///
/// `assets_dir` is served under `/assets`; a missing directory only
/// means asset requests 404.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn portal_router<S: RecordStore>(ctx: PortalContext<S>, assets_dir: &Path) -> Router {
    // Pages carry patient data: never cache.
    let pages = Router::new()
        .route(
            "/patients/:user_id/register",
            get(endpoints::register::show::<S>).post(endpoints::register::submit::<S>),
        )
        .route(
            "/patients/:user_id/new-appointment/success",
            get(endpoints::appointments::success::<S>),
        )
        .with_state(ctx)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    let assets = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static(ASSET_CACHE_CONTROL),
        ))
        .service(ServeDir::new(assets_dir));

    Router::new()
        .merge(pages)
        .route("/health", get(endpoints::health::check))
        .nest_service("/assets", assets)
        .fallback(endpoints::not_found)
        .layer(axum::middleware::from_fn(middleware::access_log::log_access))
}
