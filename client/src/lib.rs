//! # client
//!
//! Product-admin client core: session token storage, login/logout, the
//! product REST client with its error normalization, and the route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The remote product API is an external collaborator reached over HTTP.
//! Front ends (the `cli` crate, the guarded page server) consume this crate
//! and decide how to present results; this crate only preserves which kind
//! of failure happened.

pub mod net;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_api;
