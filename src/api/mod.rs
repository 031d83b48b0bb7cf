//! API clients for external services
//!
//! - Catalog: podcast show list, show details and genre details

pub mod catalog;

pub use catalog::{CatalogClient, CatalogError, DEFAULT_API_URL};
