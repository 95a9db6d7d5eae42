//! Storage layer: where the movie corpus comes from.
//!
//! # Modules
//!
//! - `backend`: [`CatalogSource`] trait the worker loads through
//! - `json`: JSON file catalog source
//! - `models`: Catalog document shapes and their normalization into records

pub mod backend;
pub mod json;
pub mod models;

pub use backend::CatalogSource;
pub use json::JsonCatalog;
pub use models::CatalogDocument;
