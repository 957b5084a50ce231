//! Login and logout against the product API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login is the only unauthenticated API call. A successful login stores the
//! returned bearer token in the injected `TokenStore`; every product call then
//! reads it back from there. Logout is purely local: it drops the token and
//! hands the login path to a caller-supplied navigation effect.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use super::config::{ApiConfig, ConfigError};
use super::error::{Action, ApiError, LOGIN_FAILED};
use super::types::{ErrorBody, LoginRequest, LoginResponse};
use crate::state::token::{SESSION_TTL, TokenStore};
use crate::util::guard::LOGIN_PATH;

/// Session lifecycle client.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    config: ApiConfig,
    tokens: Arc<dyn TokenStore>,
}

impl AuthClient {
    /// Build a client with its own HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ConfigError> {
        let http = config.http_client()?;
        Ok(Self::with_http(http, config, tokens))
    }

    /// Build a client sharing an existing HTTP connection pool.
    #[must_use]
    pub fn with_http(http: reqwest::Client, config: ApiConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self { http, config, tokens }
    }

    /// Whether a session token is currently stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_present()
    }

    /// Exchange credentials for a token via `POST /login` and store it for one day.
    ///
    /// # Errors
    ///
    /// `ApiError::Auth` when the API answers non-2xx (message from the body,
    /// else "Login failed"); `ApiError::Generic` on transport failure, an
    /// undecodable success body, or a token store write failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        tracing::debug!(%email, "login request");

        let response = self
            .http
            .post(self.config.url("/login"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::from(e).or_fallback(Action::Login))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::from(e).or_fallback(Action::Login))?;
        if !status.is_success() {
            let message = ErrorBody::parse(&text)
                .message()
                .unwrap_or(LOGIN_FAILED)
                .to_owned();
            tracing::warn!(%status, %message, "login rejected");
            return Err(ApiError::Auth(message));
        }

        let login: LoginResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::Generic(format!("invalid login response: {e}")))?;
        self.tokens
            .set(&login.token, SESSION_TTL)
            .map_err(|e| ApiError::Generic(format!("failed to store session: {e}")))?;

        tracing::info!(user_id = login.user.id, "logged in");
        Ok(login)
    }

    /// Drop the stored token, then navigate to the login page.
    ///
    /// Unconditional: runs the same way whether or not a token was stored.
    pub fn logout<F>(&self, navigate: F)
    where
        F: FnOnce(&str),
    {
        self.tokens.clear();
        tracing::info!("logged out");
        navigate(LOGIN_PATH);
    }
}
