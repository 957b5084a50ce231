//! Shared wire DTOs for the client/API boundary.
//!
//! DESIGN
//! ======
//! These types mirror the product API's JSON so serde round-trips stay
//! lossless. The API is loose about numeric encodings (decimal columns often
//! arrive as strings), so numeric fields accept either form on the way in and
//! always serialize as numbers on the way out.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Field name → validation messages, as returned under `errors` by a 422.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

/// A product record as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identifier.
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Unit price; never negative.
    #[serde(deserialize_with = "deserialize_f64_from_number")]
    pub price: f64,
    pub category: String,
    /// Units in stock; never negative.
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub quantity: u32,
    /// Owning user, if the API exposes it.
    #[serde(default, deserialize_with = "deserialize_opt_string_from_scalar", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Soft-delete marker; `None` while the product is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

impl Product {
    /// Mutable subset of this product, e.g. to seed an edit form.
    #[must_use]
    pub fn form_data(&self) -> ProductFormData {
        ProductFormData {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            category: self.category.clone(),
            quantity: self.quantity,
        }
    }

    /// Whether the product has been soft-deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Create payload: every client-editable product field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFormData {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub quantity: u32,
}

/// Update payload. Absent fields are left untouched by the API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl ProductPatch {
    /// True when no field would be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.quantity.is_none()
    }
}

impl From<ProductFormData> for ProductPatch {
    fn from(data: ProductFormData) -> Self {
        Self {
            name: Some(data.name),
            description: Some(data.description),
            price: Some(data.price),
            category: Some(data.category),
            quantity: Some(data.quantity),
        }
    }
}

/// Pagination metadata from the paginated list envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
    /// 1-based index of the first row on this page; `null` on an empty page.
    #[serde(default)]
    pub from: Option<u64>,
    /// 1-based index of the last row on this page; `null` on an empty page.
    #[serde(default)]
    pub to: Option<u64>,
}

/// One page of products, with server metadata when the API provides it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProductListing {
    pub data: Vec<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<'de> Deserialize<'de> for ProductListing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Bare(Vec<Product>),
            Envelope {
                data: Vec<Product>,
                #[serde(default)]
                meta: Option<PageMeta>,
            },
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Bare(data) => Self { data, meta: None },
            Wire::Envelope { data, meta } => Self { data, meta },
        })
    }
}

/// `POST /login` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The user record embedded in a login response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Successful `POST /login` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token.
    pub token: String,
    pub user: AuthUser,
}

/// Loose error body shared by every non-2xx response.
///
/// Fields are read independently: a malformed `errors` never hides a usable
/// `message`. A missing or non-JSON body decodes to the default value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub errors: Option<ValidationErrors>,
}

impl ErrorBody {
    /// Decode an error body, tolerating empty or non-JSON payloads.
    ///
    /// `errors` that is not an object (Laravel encodes an empty one as `[]`)
    /// becomes an empty map. A bare string under a field counts as one message.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) else {
            return Self::default();
        };
        let message = value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        let errors = value.get("errors").map(field_messages);
        Self { message, errors }
    }

    /// The body's message when present and non-empty.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

fn field_messages(value: &serde_json::Value) -> ValidationErrors {
    let Some(fields) = value.as_object() else {
        return ValidationErrors::new();
    };
    fields
        .iter()
        .filter_map(|(field, messages)| {
            let messages = match messages {
                serde_json::Value::String(message) => vec![message.clone()],
                serde_json::Value::Array(items) => items
                    .iter()
                    .filter_map(serde_json::Value::as_str)
                    .map(str::to_owned)
                    .collect(),
                _ => return None,
            };
            Some((field.clone(), messages))
        })
        .collect()
}

fn deserialize_f64_from_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match &value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(float) if float.is_finite() => Ok(float),
        _ => Err(D::Error::custom(format!("expected decimal number, got {value}"))),
    }
}

fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match &value {
        serde_json::Value::Number(number) => number.as_u64(),
        serde_json::Value::String(raw) => raw.trim().parse::<u64>().ok(),
        _ => None,
    };
    let Some(int) = parsed else {
        return Err(D::Error::custom(format!("expected non-negative integer, got {value}")));
    };
    u32::try_from(int).map_err(|_| D::Error::custom(format!("value {int} out of range for u32")))
}

fn deserialize_opt_string_from_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected string or number, got {other}"))),
    }
}
