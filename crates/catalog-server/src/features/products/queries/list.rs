//! List products query
//!
//! Returns every product with its full brand/categories graph, wrapped in
//! the `{"results": [...]}` envelope. Category memberships are loaded for
//! the whole page in one batched query and grouped in memory.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;

use crate::features::products::types::{Category, ProductBody, ProductRow};

/// Response envelope for the product listing
#[derive(Debug, Serialize, Deserialize)]
pub struct ListProductsResponse {
    pub results: Vec<ProductBody>,
}

/// Errors that can occur when listing products
#[derive(Debug, thiserror::Error)]
pub enum ListProductsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, FromRow)]
struct CategoryLink {
    product_id: i32,
    id: i32,
    name: String,
}

/// Handler function for listing all products
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<ListProductsResponse, ListProductsError> {
    let rows = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT p.id, p.name, p.rating, p.featured, p.items_in_stock,
               p.created_at, p.expiration_date, p.receipt_date,
               b.id AS brand_id, b.name AS brand_name,
               b.country_code AS brand_country_code
        FROM products p
        JOIN brands b ON b.id = p.brand_id
        ORDER BY p.id
        "#,
    )
    .fetch_all(&pool)
    .await?;

    let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
    let links = sqlx::query_as::<_, CategoryLink>(
        r#"
        SELECT pc.product_id, c.id, c.name
        FROM products_categories pc
        JOIN categories c ON c.id = pc.category_id
        WHERE pc.product_id = ANY($1)
        ORDER BY pc.product_id, c.id
        "#,
    )
    .bind(&ids)
    .fetch_all(&pool)
    .await?;

    let mut by_product: HashMap<i32, Vec<Category>> = HashMap::new();
    for link in links {
        by_product.entry(link.product_id).or_default().push(Category {
            id: link.id,
            name: link.name,
        });
    }

    let results = rows
        .into_iter()
        .map(|row| {
            let categories = by_product.remove(&row.id).unwrap_or_default();
            ProductBody::from_parts(row, categories)
        })
        .collect();

    Ok(ListProductsResponse { results })
}
