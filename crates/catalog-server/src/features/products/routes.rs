//! Product API routes
//!
//! Wires the product commands and queries to Axum HTTP handlers.
//!
//! # Route Structure
//!
//! - `GET /products` - List all products
//! - `POST /products` - Create a product
//! - `GET /products/:id` - Get a single product by id
//! - `PUT /products/:id` - Partially update a product
//! - `DELETE /products/:id` - Delete a product (idempotent)
//!
//! # Status Mapping
//!
//! The error envelope is `{"message", "status_code"}` and the split is part
//! of the published compatibility contract: a missing record on GET/PUT is
//! 404, and every other failure (payload type errors, validation,
//! unresolved reference names, database errors) is 410.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use sqlx::PgPool;

use crate::api::response::error_response;

use super::{
    commands::{CreateProductError, DeleteProductError, UpdateProductError},
    queries::{GetProductError, ListProductsError},
};

// ============================================================================
// Router Configuration
// ============================================================================

/// Creates the products router with all routes configured
pub fn products_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Create a new product
///
/// `POST /products` with a JSON object carrying product columns plus a
/// `brand` name and a `categories` name list. Returns `201 Created` with
/// the serialized product graph, or `410` on any failure.
#[tracing::instrument(skip(pool, payload))]
async fn create_product(
    State(pool): State<PgPool>,
    Json(payload): Json<Value>,
) -> Result<Response, ProductApiError> {
    tracing::debug!(payload = %payload, "got create payload");

    let body = super::commands::create::handle(pool, payload).await?;

    tracing::info!(product_id = %body.id, "Product created via API");

    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// Partially update an existing product
///
/// `PUT /products/:id`. Only the keys present in the payload are applied.
/// Returns `200 OK` with the updated graph, `404` if the id is unknown, or
/// `410` on any other failure.
#[tracing::instrument(skip(pool, payload), fields(product_id = %id))]
async fn update_product(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> Result<Response, ProductApiError> {
    tracing::debug!(payload = %payload, "got update payload");

    let body = super::commands::update::handle(pool, id, payload).await?;

    tracing::info!(product_id = %id, "Product updated via API");

    Ok((StatusCode::OK, Json(body)).into_response())
}

/// Delete a product
///
/// `DELETE /products/:id`. Returns `204 No Content` whether or not the id
/// existed; only a database failure produces an error.
#[tracing::instrument(skip(pool), fields(product_id = %id))]
async fn delete_product(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Response, ProductApiError> {
    super::commands::delete::handle(pool, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// Get a single product by id
///
/// `GET /products/:id`. Returns `200 OK`, or `404` with the id in the
/// message when absent.
#[tracing::instrument(skip(pool), fields(product_id = %id))]
async fn get_product(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Response, ProductApiError> {
    let body = super::queries::get::handle(pool, id).await?;

    Ok((StatusCode::OK, Json(body)).into_response())
}

/// List all products
///
/// `GET /products`. Returns `200 OK` with `{"results": [...]}`.
#[tracing::instrument(skip(pool))]
async fn list_products(State(pool): State<PgPool>) -> Result<Response, ProductApiError> {
    let response = super::queries::list::handle(pool).await?;

    tracing::debug!(count = response.results.len(), "Products listed via API");

    Ok((StatusCode::OK, Json(response)).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for product API endpoints
#[derive(Debug)]
enum ProductApiError {
    Create(CreateProductError),
    Update(UpdateProductError),
    Delete(DeleteProductError),
    Get(GetProductError),
    List(ListProductsError),
}

impl From<CreateProductError> for ProductApiError {
    fn from(err: CreateProductError) -> Self {
        Self::Create(err)
    }
}

impl From<UpdateProductError> for ProductApiError {
    fn from(err: UpdateProductError) -> Self {
        Self::Update(err)
    }
}

impl From<DeleteProductError> for ProductApiError {
    fn from(err: DeleteProductError) -> Self {
        Self::Delete(err)
    }
}

impl From<GetProductError> for ProductApiError {
    fn from(err: GetProductError) -> Self {
        Self::Get(err)
    }
}

impl From<ListProductsError> for ProductApiError {
    fn from(err: ListProductsError) -> Self {
        Self::List(err)
    }
}

impl ProductApiError {
    fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProductApiError::Get(GetProductError::NotFound(_))
                | ProductApiError::Update(UpdateProductError::NotFound(_))
        )
    }

    fn is_database(&self) -> bool {
        matches!(
            self,
            ProductApiError::Create(CreateProductError::Database(_))
                | ProductApiError::Update(UpdateProductError::Database(_))
                | ProductApiError::Delete(DeleteProductError::Database(_))
                | ProductApiError::Get(GetProductError::Database(_))
                | ProductApiError::List(ListProductsError::Database(_))
        )
    }
}

impl IntoResponse for ProductApiError {
    fn into_response(self) -> Response {
        if self.is_not_found() {
            return error_response(StatusCode::NOT_FOUND, self.to_string());
        }

        if self.is_database() {
            tracing::error!("Database error during product operation: {}", self);
        }

        // Compatibility contract: every non-404 failure is 410.
        error_response(StatusCode::GONE, self.to_string())
    }
}

impl std::fmt::Display for ProductApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create(e) => write!(f, "{}", e),
            Self::Update(e) => write!(f, "{}", e),
            Self::Delete(e) => write!(f, "{}", e),
            Self::Get(e) => write!(f, "{}", e),
            Self::List(e) => write!(f, "{}", e),
        }
    }
}
