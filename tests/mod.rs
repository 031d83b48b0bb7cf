//! Integration tests for podtui
//!
//! Tests are organized by component:
//! - catalog_test: Catalog API client (show list, show detail, genre, errors)
//! - discovery_test: Filtering, pagination and season selection
//! - cli_test: Argument parsing and command handlers against a mocked catalog
//! - ui_test: Full-frame rendering into a TestBackend
//! - e2e_test: End-to-end flows through the fetch worker (List -> Detail -> Back)

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
