//! Normalized failure taxonomy for API and auth calls.
//!
//! DESIGN
//! ======
//! Every failure a caller sees is one of three shapes. `Validation` carries the
//! per-field map from a 422 so forms can annotate individual inputs; it is
//! never collapsed into a plain message. `Auth` marks a missing or rejected
//! session. Everything else, including transport failures, is `Generic`.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use super::types::ValidationErrors;

/// Message used when no token is stored.
pub const NOT_AUTHENTICATED: &str = "not authenticated";
/// Default message for a 422 without one.
pub const VALIDATION_FAILED: &str = "Validation failed";
/// Default message for other non-2xx responses without one.
pub const GENERIC_FAILURE: &str = "An error occurred";
/// Default message for a rejected login without one.
pub const LOGIN_FAILED: &str = "Login failed";

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code for structured error output.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by auth and product operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No session, or the API rejected the credentials.
    #[error("{0}")]
    Auth(String),

    /// The API rejected the payload (HTTP 422).
    #[error("{message}")]
    Validation { message: String, errors: ValidationErrors },

    /// Any other failure: server error, transport error, undecodable body.
    #[error("{0}")]
    Generic(String),
}

impl ApiError {
    /// Field errors when this is a validation failure.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Human-readable message regardless of shape.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Auth(message) | Self::Generic(message) | Self::Validation { message, .. } => message,
        }
    }

    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Replace an empty message with the action's fallback, keeping the shape.
    #[must_use]
    pub fn or_fallback(self, action: Action) -> Self {
        match self {
            Self::Auth(message) if message.is_empty() => Self::Auth(action.fallback().to_owned()),
            Self::Generic(message) if message.is_empty() => Self::Generic(action.fallback().to_owned()),
            Self::Validation { message, errors } if message.is_empty() => {
                Self::Validation { message: action.fallback().to_owned(), errors }
            }
            other => other,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Auth(_) => "E_AUTH",
            Self::Validation { .. } => "E_VALIDATION",
            Self::Generic(_) => "E_GENERIC",
        }
    }
}

// =============================================================================
// ACTIONS
// =============================================================================

/// The operation a failure came from; selects the fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    FetchProducts,
    FetchProduct,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
}

impl Action {
    #[must_use]
    pub fn fallback(self) -> &'static str {
        match self {
            Self::Login => LOGIN_FAILED,
            Self::FetchProducts => "failed to fetch products",
            Self::FetchProduct => "failed to fetch product",
            Self::CreateProduct => "failed to create product",
            Self::UpdateProduct => "failed to update product",
            Self::DeleteProduct => "failed to delete product",
        }
    }

    /// Short name used in log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::FetchProducts => "fetch_products",
            Self::FetchProduct => "fetch_product",
            Self::CreateProduct => "create_product",
            Self::UpdateProduct => "update_product",
            Self::DeleteProduct => "delete_product",
        }
    }
}
