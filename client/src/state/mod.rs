//! Client-side state: the session token and the presentation models that
//! front ends drive (catalog paging/search and the product form).

pub mod catalog;
pub mod form;
pub mod token;
