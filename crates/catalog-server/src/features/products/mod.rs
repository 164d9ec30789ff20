//! Products feature slice
//!
//! CRUD over the `/products` resource family. Payloads reference brands and
//! categories by name; the command handlers resolve them to foreign keys.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use routes::products_routes;
