//! Catalog Server Library
//!
//! HTTP server exposing a product catalog backed by PostgreSQL.
//!
//! # Overview
//!
//! The server provides a small REST API over three relational entities:
//!
//! - **Products**: the primary resource, exposed under `/products`
//! - **Brands**: one brand has many products; referenced by name in payloads
//! - **Categories**: many-to-many with products via a join table
//!
//! # Architecture
//!
//! Features are organized as vertical slices with commands (write
//! operations) and queries (read operations) implemented as standalone
//! handler functions taking an explicit [`sqlx::PgPool`]. Multi-statement
//! writes run inside an explicit transaction so a failed create or update
//! leaves no partial record behind.
//!
//! Request payloads are raw JSON objects: only keys matching known product
//! columns are applied, `brand` and `categories` keys are resolved by exact
//! name lookup, and every field passes an explicit typed validator before
//! persistence.
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework and routing
//! - **SQLx**: PostgreSQL pool, queries, and migrations
//! - **Tower / tower-http**: trace, CORS, and compression layers
//!
//! # Example
//!
//! ```no_run
//! use catalog_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod features;
pub mod middleware;
