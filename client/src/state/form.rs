//! Create/edit form state for a single product.
//!
//! DESIGN
//! ======
//! A validation failure from the API is routed field by field: the form keeps
//! the whole `field -> messages` map, shows the first message per field, and
//! drops a field's messages as soon as that field is edited. Other failures
//! only produce a status banner.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use crate::net::error::ApiError;
use crate::net::types::{Product, ProductFormData, ProductPatch, ValidationErrors};

pub const CHECK_FORM_MESSAGE: &str = "Please check the form for errors";
pub const CREATED_MESSAGE: &str = "Product created successfully";
pub const UPDATED_MESSAGE: &str = "Product updated successfully";

/// Outcome banner shown above the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusMessage {
    Success(String),
    Error(String),
}

/// Editable product fields, addressed by their wire names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Price,
    Category,
    Quantity,
}

impl FormField {
    pub const ALL: [FormField; 5] = [Self::Name, Self::Description, Self::Price, Self::Category, Self::Quantity];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Price => "price",
            Self::Category => "category",
            Self::Quantity => "quantity",
        }
    }
}

/// State of the product form, for both create and edit.
#[derive(Clone, Debug, Default)]
pub struct ProductForm {
    /// `Some(id)` when editing an existing product.
    pub editing: Option<i64>,
    pub data: ProductFormData,
    pub errors: ValidationErrors,
    pub status: Option<StatusMessage>,
    pub submitting: bool,
}

impl ProductForm {
    /// Empty form for a new product.
    #[must_use]
    pub fn create() -> Self {
        Self::default()
    }

    /// Form seeded from an existing product.
    #[must_use]
    pub fn edit(product: &Product) -> Self {
        Self { editing: Some(product.id), data: product.form_data(), ..Self::default() }
    }

    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    /// First message for `field`, if the API rejected it.
    #[must_use]
    pub fn first_error(&self, field: FormField) -> Option<&str> {
        self.errors
            .get(field.as_str())
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Record an edit to `field`: clears that field's errors and the banner.
    pub fn touch(&mut self, field: FormField) {
        self.errors.remove(field.as_str());
        self.status = None;
    }

    /// Start a submission. Returns `false` if one is already in flight.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        self.errors.clear();
        self.status = None;
        true
    }

    /// Update payload covering every field of the form.
    #[must_use]
    pub fn patch(&self) -> ProductPatch {
        ProductPatch::from(self.data.clone())
    }

    /// Apply the outcome of a create or update.
    pub fn finish_submit(&mut self, result: Result<&Product, &ApiError>) {
        self.submitting = false;
        match result {
            Ok(product) => {
                let message = if self.is_edit() { UPDATED_MESSAGE } else { CREATED_MESSAGE };
                self.editing = Some(product.id);
                self.status = Some(StatusMessage::Success(message.to_owned()));
            }
            Err(err) => {
                if let Some(errors) = err.validation_errors() {
                    self.errors = errors.clone();
                    self.status = Some(StatusMessage::Error(CHECK_FORM_MESSAGE.to_owned()));
                } else {
                    self.status = Some(StatusMessage::Error(err.to_string()));
                }
            }
        }
    }
}
