//! Catalog Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging initialization for the catalog
//! workspace members.

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{CatalogError, Result};
