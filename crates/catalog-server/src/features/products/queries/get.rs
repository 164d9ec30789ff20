//! Get product query

use sqlx::{PgConnection, PgPool};

use crate::db::lookups;
use crate::features::products::types::{ProductBody, ProductRow};

/// Errors that can occur when retrieving a product
#[derive(Debug, thiserror::Error)]
pub enum GetProductError {
    #[error("Product with id {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Fetch a product row joined with its brand columns
pub(crate) async fn fetch_product_row(
    conn: &mut PgConnection,
    id: i32,
) -> Result<Option<ProductRow>, sqlx::Error> {
    sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT p.id, p.name, p.rating, p.featured, p.items_in_stock,
               p.created_at, p.expiration_date, p.receipt_date,
               b.id AS brand_id, b.name AS brand_name,
               b.country_code AS brand_country_code
        FROM products p
        JOIN brands b ON b.id = p.brand_id
        WHERE p.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
}

/// Handler function for retrieving a single product
#[tracing::instrument(skip(pool), fields(product_id = %id))]
pub async fn handle(pool: PgPool, id: i32) -> Result<ProductBody, GetProductError> {
    let mut conn = pool.acquire().await?;

    let row = fetch_product_row(&mut conn, id)
        .await?
        .ok_or(GetProductError::NotFound(id))?;
    let categories = lookups::categories_for_product(&mut conn, id).await?;

    Ok(ProductBody::from_parts(row, categories))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_contains_id() {
        let err = GetProductError::NotFound(123);
        assert_eq!(err.to_string(), "Product with id 123 not found");
    }
}
