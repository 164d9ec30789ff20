//! Update product command
//!
//! Partial field replacement: only the keys present in the payload are
//! applied, and a `categories` key replaces the full membership set. The
//! whole update runs in one transaction, so a validation or resolution
//! failure leaves the stored row untouched.

use serde_json::Value;
use sqlx::PgPool;

use crate::db::lookups;
use crate::features::products::types::{Category, PayloadError, ProductBody, ProductDraft};

/// Errors that can occur when updating a product
#[derive(Debug, thiserror::Error)]
pub enum UpdateProductError {
    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error("Product with id {0} not found")]
    NotFound(i32),

    #[error("got unknown brand {0}")]
    UnknownBrand(String),

    #[error("got unknown category {0}")]
    UnknownCategory(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function for updating products
///
/// Unlike create, there is no required-reference rule here: a product may
/// end up with an empty category set if a later update never touches the
/// `categories` key after memberships are removed elsewhere.
#[tracing::instrument(skip(pool, payload), fields(product_id = %id))]
pub async fn handle(
    pool: PgPool,
    id: i32,
    payload: Value,
) -> Result<ProductBody, UpdateProductError> {
    let draft = ProductDraft::from_value(&payload)?;

    let mut tx = pool.begin().await?;

    let existing: Option<(String, f64, bool, i32, Option<chrono::DateTime<chrono::Utc>>, Option<chrono::DateTime<chrono::Utc>>, i32)> =
        sqlx::query_as(
            r#"
            SELECT name, rating, featured, items_in_stock,
                   expiration_date, receipt_date, brand_id
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

    let (name, rating, featured, items_in_stock, expiration_date, receipt_date, brand_id) =
        existing.ok_or(UpdateProductError::NotFound(id))?;

    let brand_id = match draft.brand {
        Some(brand_name) => {
            lookups::brand_by_name(&mut tx, &brand_name)
                .await?
                .ok_or(UpdateProductError::UnknownBrand(brand_name))?
                .id
        },
        None => brand_id,
    };

    let new_categories: Option<Vec<Category>> = match draft.categories {
        Some(names) => {
            let mut resolved = Vec::with_capacity(names.len());
            for category_name in names {
                let category = lookups::category_by_name(&mut tx, &category_name)
                    .await?
                    .ok_or(UpdateProductError::UnknownCategory(category_name))?;
                resolved.push(category);
            }
            Some(resolved)
        },
        None => None,
    };

    let name = draft.name.unwrap_or(name);
    let rating = draft.rating.unwrap_or(rating);
    let featured = draft.featured.unwrap_or(featured);
    let items_in_stock = draft.items_in_stock.unwrap_or(items_in_stock);
    // An explicit null in the payload clears the stored date; an absent key
    // keeps it.
    let expiration_date = draft.expiration_date.unwrap_or(expiration_date);
    let receipt_date = draft.receipt_date.unwrap_or(receipt_date);

    sqlx::query(
        r#"
        UPDATE products
        SET name = $2, rating = $3, featured = $4, items_in_stock = $5,
            expiration_date = $6, receipt_date = $7, brand_id = $8
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&name)
    .bind(rating)
    .bind(featured)
    .bind(items_in_stock)
    .bind(expiration_date)
    .bind(receipt_date)
    .bind(brand_id)
    .execute(&mut *tx)
    .await?;

    if let Some(ref categories) = new_categories {
        sqlx::query("DELETE FROM products_categories WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for category in categories {
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
    }

    // Re-read the full graph so the response reflects exactly what was
    // committed, including an unchanged category set.
    let row = super::super::queries::get::fetch_product_row(&mut tx, id)
        .await?
        .ok_or(UpdateProductError::NotFound(id))?;
    let categories = match new_categories {
        Some(categories) => categories,
        None => lookups::categories_for_product(&mut tx, id).await?,
    };

    tx.commit().await?;

    tracing::info!(product_id = %id, "Product updated");

    Ok(ProductBody::from_parts(row, categories))
}
