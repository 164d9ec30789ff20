//! Feature modules implementing the catalog API
//!
//! Each feature is a vertical slice with its own commands (write
//! operations), queries (read operations), routes, and types. Handlers are
//! standalone async functions taking an explicit [`sqlx::PgPool`].

pub mod products;
pub mod shared;

use axum::Router;
use sqlx::PgPool;

/// Creates the main API router with all feature routes mounted
pub fn router(pool: PgPool) -> Router<()> {
    Router::new().nest("/products", products::products_routes().with_state(pool))
}
