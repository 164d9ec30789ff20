//! Create product command
//!
//! Resolves the `brand` and `categories` reference names, validates the
//! payload fields, and writes the product row plus its category memberships
//! in a single transaction. Any failure rolls back with no record created.

use serde_json::Value;
use sqlx::PgPool;

use crate::db::lookups;
use crate::features::products::types::{Category, PayloadError, ProductBody, ProductDraft};

/// Errors that can occur when creating a product
#[derive(Debug, thiserror::Error)]
pub enum CreateProductError {
    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error("[{0}] is required")]
    MissingField(&'static str),

    #[error("brand is required")]
    BrandRequired,

    #[error("categories is required")]
    CategoriesRequired,

    #[error("got unknown brand {0}")]
    UnknownBrand(String),

    #[error("got unknown category {0}")]
    UnknownCategory(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function for creating products
///
/// # Errors
///
/// - Payload extraction or field validation failures
/// - `BrandRequired` / `CategoriesRequired` when either reference is absent
/// - `UnknownBrand` / `UnknownCategory` when a name does not resolve
/// - `MissingField` for absent NOT NULL columns
/// - Database errors from the underlying pool
#[tracing::instrument(skip(pool, payload))]
pub async fn handle(pool: PgPool, payload: Value) -> Result<ProductBody, CreateProductError> {
    let draft = ProductDraft::from_value(&payload)?;

    let mut tx = pool.begin().await?;

    let brand = match draft.brand {
        Some(name) => lookups::brand_by_name(&mut tx, &name)
            .await?
            .ok_or(CreateProductError::UnknownBrand(name))?,
        None => return Err(CreateProductError::BrandRequired),
    };

    let category_names = draft
        .categories
        .ok_or(CreateProductError::CategoriesRequired)?;
    let mut categories: Vec<Category> = Vec::with_capacity(category_names.len());
    for name in category_names {
        let category = lookups::category_by_name(&mut tx, &name)
            .await?
            .ok_or(CreateProductError::UnknownCategory(name))?;
        categories.push(category);
    }

    let name = draft.name.ok_or(CreateProductError::MissingField("name"))?;
    let rating = draft
        .rating
        .ok_or(CreateProductError::MissingField("rating"))?;
    let items_in_stock = draft
        .items_in_stock
        .ok_or(CreateProductError::MissingField("items_in_stock"))?;
    let featured = draft.featured.unwrap_or(false);
    // On create an explicit null and an absent key both mean no date.
    let expiration_date = draft.expiration_date.flatten();
    let receipt_date = draft.receipt_date.flatten();

    let (id, created_at): (i32, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        r#"
        INSERT INTO products (name, rating, featured, items_in_stock,
                              expiration_date, receipt_date, brand_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, created_at
        "#,
    )
    .bind(&name)
    .bind(rating)
    .bind(featured)
    .bind(items_in_stock)
    .bind(expiration_date)
    .bind(receipt_date)
    .bind(brand.id)
    .fetch_one(&mut *tx)
    .await?;

    for category in &categories {
        sqlx::query(
            r#"
            INSERT INTO products_categories (product_id, category_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(id)
        .bind(category.id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(product_id = %id, product_name = %name, "Product created");

    Ok(ProductBody {
        id,
        name,
        rating,
        featured,
        items_in_stock,
        receipt_date,
        brand,
        categories,
        expiration_date,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Reference resolution and persistence are covered by the ignored
    // database tests in tests/api_products_tests.rs; these exercise the
    // pre-database failure paths via the error type itself.

    #[test]
    fn test_payload_error_converts() {
        let err: CreateProductError = PayloadError::NotAnObject.into();
        assert!(matches!(err, CreateProductError::Payload(_)));
    }

    #[test]
    fn test_error_messages_name_the_reference() {
        let err = CreateProductError::UnknownBrand("NoSuchBrand".to_string());
        assert_eq!(err.to_string(), "got unknown brand NoSuchBrand");

        let err = CreateProductError::UnknownCategory("nope".to_string());
        assert_eq!(err.to_string(), "got unknown category nope");
    }

    #[test]
    fn test_missing_field_message() {
        let err = CreateProductError::MissingField("rating");
        assert_eq!(err.to_string(), "[rating] is required");
    }

    #[test]
    fn test_draft_extraction_runs_before_resolution() {
        // A bad payload never needs a database to be rejected.
        let draft = ProductDraft::from_value(&json!({"featured": "yes"}));
        assert!(draft.is_err());
    }
}
