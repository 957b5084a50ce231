//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Serves the admin pages as static files. Every request passes through the
//! route guard middleware first, so a browser without an `auth_token` cookie
//! is sent to `/login` before any protected page is returned. The product API
//! itself lives elsewhere; this server never proxies it.

pub mod guard;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use client::util::guard::{LOGIN_PATH, RouteGuard};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Prefix excluded from the guard so probes never need a session.
const HEALTHZ_SEGMENT: &str = "healthz";

/// Full application router for `config`.
pub fn app(config: &ServerConfig) -> Router {
    let exclusions = std::iter::once(HEALTHZ_SEGMENT).chain(config.extra_exclusions.iter().map(String::as_str));
    let guard = Arc::new(RouteGuard::with_extra(exclusions));
    tracing::debug!(exclusions = ?guard.exclusions(), "route guard configured");

    pages(&config.static_dir)
        .route("/healthz", get(healthz))
        .layer(middleware::from_fn_with_state(guard, guard::enforce))
        .layer(TraceLayer::new_for_http())
}

/// Static pages. `/login` maps to `login.html` so it never gains a trailing
/// slash that the guard would treat as a protected path.
fn pages(static_dir: &Path) -> Router {
    let site = ServeDir::new(static_dir).append_index_html_on_directories(true);
    Router::new()
        .route_service(LOGIN_PATH, ServeFile::new(static_dir.join("login.html")))
        .fallback_service(site)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
