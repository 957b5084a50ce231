//! Product catalog state: the loaded page, paging controls and search.
//!
//! DESIGN
//! ======
//! Paging is page-number based and 1-indexed. Whether another page exists is
//! inferred from the row count: a full page means "maybe more", a short page
//! means "last page". Search filters the loaded page only; it never triggers
//! a request.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::net::api::{DEFAULT_LIMIT, DEFAULT_PAGE, PageRequest};
use crate::net::error::ApiError;
use crate::net::types::Product;

/// True when `term` occurs case-insensitively in the product's name,
/// description or category. An empty term matches everything.
#[must_use]
pub fn matches_search(product: &Product, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    [&product.name, &product.description, &product.category]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

/// One page of the catalog as shown to the user.
#[derive(Clone, Debug)]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub page: u32,
    pub limit: u32,
    pub loading: bool,
    pub search: String,
    pub error: Option<String>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl CatalogState {
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            products: Vec::new(),
            page: DEFAULT_PAGE,
            limit: limit.max(1),
            loading: false,
            search: String::new(),
            error: None,
        }
    }

    /// Mark a load of `page` as in flight and return the request to send.
    pub fn begin_load(&mut self, page: u32) -> PageRequest {
        self.loading = true;
        self.error = None;
        PageRequest::new(page.max(1), self.limit)
    }

    /// Apply the outcome of a load started with [`CatalogState::begin_load`].
    ///
    /// On failure the previously loaded page stays visible.
    pub fn finish_load(&mut self, request: PageRequest, result: Result<Vec<Product>, ApiError>) {
        self.loading = false;
        match result {
            Ok(products) => {
                self.products = products;
                self.page = request.page;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// A full page suggests more rows may exist.
    #[must_use]
    pub fn has_next(&self) -> bool {
        usize::try_from(self.limit).is_ok_and(|limit| self.products.len() >= limit)
    }

    #[must_use]
    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous().then(|| self.page - 1)
    }

    /// `None` when the page is short or already the last addressable one.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then_some(self.page).and_then(|page| page.checked_add(1))
    }

    pub fn set_search(&mut self, term: &str) {
        term.clone_into(&mut self.search);
    }

    /// Loaded products matching the current search term.
    #[must_use]
    pub fn visible(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| matches_search(p, &self.search))
            .collect()
    }

    /// Whether to show the "No products found" placeholder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.loading && self.visible().is_empty()
    }

    /// Drop a product after a successful delete. Returns whether it was loaded.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }
}
