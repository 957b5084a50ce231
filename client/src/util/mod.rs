//! Helpers shared by front ends.
//!
//! SYSTEM CONTEXT
//! ==============
//! `guard` holds the route-protection decision, `format` the display helpers
//! used when listing products.

pub mod format;
pub mod guard;
