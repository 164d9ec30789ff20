//! Error types shared across the catalog workspace

use thiserror::Error;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Main error type for cross-crate failures
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
