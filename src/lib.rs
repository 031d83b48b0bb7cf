//! podtui - terminal podcast browser
//!
//! Search, filter and page through a podcast catalog, then drill into a
//! show's seasons and episodes.
//!
//! # Modules
//!
//! - `genres` - Static genre id → name table
//! - `models` - Show, season, episode and query types plus display helpers
//! - `api` - Catalog API client
//! - `discovery` - Filtering, pagination and season selection
//! - `route` - Navigable addresses for the two views
//! - `app` - Application state and navigation
//! - `fetch` - Background fetch worker
//! - `ui` - TUI components
//! - `cli` / `commands` - Scriptable command line

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod fetch;
pub mod genres;
pub mod logging;
pub mod models;
pub mod route;
pub mod ui;

// Re-export commonly used types
pub use models::{Episode, GenreDetail, QueryState, Season, ShowDetail, ShowPreview};

pub use api::{CatalogClient, CatalogError};
pub use app::{App, AppState};
pub use route::Route;
