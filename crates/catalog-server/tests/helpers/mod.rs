//! Shared helpers for API integration tests
//!
//! These require a running PostgreSQL instance reachable via
//! `TEST_DATABASE_URL` (falling back to `DATABASE_URL`). Tests that use
//! them are `#[ignore]`d so the default test run stays database-free.

use axum::Router;
use catalog_server::api::{create_router, AppState};
use catalog_server::config::Config;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connect to the test database, apply migrations, and wipe catalog tables
pub async fn setup_test_db() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("TEST_DATABASE_URL or DATABASE_URL must be set for database tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("failed to connect to test database");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    sqlx::query("TRUNCATE products_categories, products, categories, brands RESTART IDENTITY")
        .execute(&pool)
        .await
        .expect("failed to truncate catalog tables");

    pool
}

/// Build the application router around a test pool
pub fn setup_test_app(pool: PgPool) -> Router {
    let config = Config::default();
    create_router(AppState { db: pool }, &config)
}

/// Insert a brand and return its id
pub async fn seed_brand(pool: &PgPool, name: &str, country_code: &str) -> i32 {
    let (id,): (i32,) =
        sqlx::query_as("INSERT INTO brands (name, country_code) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(country_code)
            .fetch_one(pool)
            .await
            .expect("failed to seed brand");
    id
}

/// Insert a category and return its id
pub async fn seed_category(pool: &PgPool, name: &str) -> i32 {
    let (id,): (i32,) = sqlx::query_as("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("failed to seed category");
    id
}
