//! Product REST client.
//!
//! ARCHITECTURE
//! ============
//! Every operation follows the same template:
//! 1. read the bearer token from the `TokenStore`; without one, fail with
//!    `ApiError::Auth` before anything touches the network;
//! 2. send the request with `Authorization: Bearer <token>`;
//! 3. normalize the response through [`handle_response`];
//! 4. fill empty messages with the operation's fallback, keeping the shape.
//!
//! ERROR HANDLING
//! ==============
//! No retries. A 422 becomes `ApiError::Validation` with its field map intact,
//! any other non-2xx becomes `ApiError::Generic`, and transport failures
//! (including timeouts from `ApiConfig::http_client`) are `Generic` too.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::config::{ApiConfig, ConfigError};
use super::error::{Action, ApiError, GENERIC_FAILURE, NOT_AUTHENTICATED, VALIDATION_FAILED};
use super::types::{ErrorBody, Product, ProductFormData, ProductListing, ProductPatch};
use crate::state::token::TokenStore;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Page-based list query. Pages are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT }
    }
}

impl PageRequest {
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Query string sent to `GET /products`.
    #[must_use]
    pub fn query(self) -> String {
        format!("page={}&limit={}", self.page, self.limit)
    }
}

fn products_path(page: PageRequest) -> String {
    format!("/products?{}", page.query())
}

fn product_path(id: i64) -> String {
    format!("/products/{id}")
}

/// Map a response status and raw body onto the error taxonomy.
///
/// 2xx passes. 422 yields `Validation` with the body's `errors` map (empty
/// if absent) and message (default "Validation failed"). Anything else yields
/// `Generic` with the body's message (default "An error occurred"); bodies
/// that are not JSON are treated as `{}`.
///
/// # Errors
///
/// Returns the normalized error for any non-2xx status.
pub fn handle_response(status: StatusCode, body: &str) -> Result<(), ApiError> {
    if status.is_success() {
        return Ok(());
    }
    let parsed = ErrorBody::parse(body);
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        return Err(ApiError::Validation {
            message: parsed.message().unwrap_or(VALIDATION_FAILED).to_owned(),
            errors: parsed.errors.unwrap_or_default(),
        });
    }
    Err(ApiError::Generic(parsed.message().unwrap_or(GENERIC_FAILURE).to_owned()))
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Generic(format!("invalid response body: {e}")))
}

/// Authenticated product CRUD client.
#[derive(Clone)]
pub struct ProductClient {
    http: reqwest::Client,
    config: ApiConfig,
    tokens: Arc<dyn TokenStore>,
}

impl ProductClient {
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

    /// `GET /products?page=&limit=`: the rows of one page.
    ///
    /// Callers infer another page may exist when exactly `limit` rows return.
    ///
    /// # Errors
    ///
    /// See the module-level error handling notes.
    pub async fn fetch_products(&self, page: PageRequest) -> Result<Vec<Product>, ApiError> {
        Ok(self.fetch_product_listing(page).await?.data)
    }

    /// `GET /products?page=&limit=` keeping pagination metadata when the API
    /// answers with the paginated envelope.
    ///
    /// # Errors
    ///
    /// See the module-level error handling notes.
    pub async fn fetch_product_listing(&self, page: PageRequest) -> Result<ProductListing, ApiError> {
        let body = self
            .send(Action::FetchProducts, Method::GET, &products_path(page), None::<&()>)
            .await?;
        decode_body(&body).map_err(|e| self.fail(Action::FetchProducts, e))
    }

    /// `GET /products/{id}`.
    ///
    /// # Errors
    ///
    /// See the module-level error handling notes.
    pub async fn fetch_product(&self, id: i64) -> Result<Product, ApiError> {
        let body = self
            .send(Action::FetchProduct, Method::GET, &product_path(id), None::<&()>)
            .await?;
        decode_body(&body).map_err(|e| self.fail(Action::FetchProduct, e))
    }

    /// `POST /products`.
    ///
    /// # Errors
    ///
    /// See the module-level error handling notes.
    pub async fn create_product(&self, data: &ProductFormData) -> Result<Product, ApiError> {
        let body = self
            .send(Action::CreateProduct, Method::POST, "/products", Some(data))
            .await?;
        decode_body(&body).map_err(|e| self.fail(Action::CreateProduct, e))
    }

    /// `PUT /products/{id}` with only the fields present in `patch`.
    ///
    /// # Errors
    ///
    /// See the module-level error handling notes.
    pub async fn update_product(&self, id: i64, patch: &ProductPatch) -> Result<Product, ApiError> {
        let body = self
            .send(Action::UpdateProduct, Method::PUT, &product_path(id), Some(patch))
            .await?;
        decode_body(&body).map_err(|e| self.fail(Action::UpdateProduct, e))
    }

    /// `DELETE /products/{id}`. Any success body is ignored.
    ///
    /// # Errors
    ///
    /// See the module-level error handling notes.
    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.send(Action::DeleteProduct, Method::DELETE, &product_path(id), None::<&()>)
            .await?;
        Ok(())
    }

    /// Run steps 1–3 of the request template and return the success body.
    async fn send<B>(&self, action: Action, method: Method, path: &str, body: Option<&B>) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.try_send(method, path, body)
            .await
            .map_err(|e| self.fail(action, e))
    }

    async fn try_send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let token = self
            .tokens
            .get()
            .ok_or_else(|| ApiError::Auth(NOT_AUTHENTICATED.to_owned()))?;

        tracing::debug!(%method, %path, "api request");
        let mut request = self
            .http
            .request(method, self.config.url(path))
            .bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        handle_response(status, &text)?;
        Ok(text)
    }

    fn fail(&self, action: Action, error: ApiError) -> ApiError {
        let error = error.or_fallback(action);
        tracing::warn!(
            action = action.as_str(),
            base_url = %self.config.base_url,
            error = %error,
            "api call failed"
        );
        error
    }
}
