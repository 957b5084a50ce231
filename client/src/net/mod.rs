//! Networking modules for the product REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` handles login/logout, `api` handles product CRUD, `error` defines the
//! normalized failure taxonomy, `config` resolves base URL and timeouts, and
//! `types` defines the shared wire schema.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod types;
