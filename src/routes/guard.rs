//! Route guard middleware.
//!
//! Reads the `auth_token` cookie and applies [`RouteGuard::decide`] to the
//! request path. Redirects are `307 Temporary Redirect` so the browser retries
//! with the same method.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use client::state::token::AUTH_COOKIE_NAME;
use client::util::guard::{Navigation, RouteGuard};

/// Whether the request carries a non-empty session cookie.
pub(crate) fn has_session(jar: &CookieJar) -> bool {
    jar.get(AUTH_COOKIE_NAME).is_some_and(|cookie| !cookie.value().is_empty())
}

pub async fn enforce(State(guard): State<Arc<RouteGuard>>, jar: CookieJar, request: Request, next: Next) -> Response {
    let token_present = has_session(&jar);
    let decision = guard.decide(request.uri().path(), token_present);
    match decision {
        Navigation::Allow => next.run(request).await,
        Navigation::Redirect(target) => {
            tracing::debug!(path = %request.uri().path(), target, token_present, "guard redirect");
            Redirect::temporary(target).into_response()
        }
    }
}
