//! Reference lookups for payload resolution
//!
//! Product payloads carry brand and category *names*; these helpers resolve
//! them to stored rows by exact name match. They take `&mut PgConnection`
//! so the same lookup runs against a pooled connection or inside an open
//! transaction.

use sqlx::PgConnection;

use crate::features::products::types::{Brand, Category};

/// Resolve a brand by exact name
pub async fn brand_by_name(
    conn: &mut PgConnection,
    name: &str,
) -> Result<Option<Brand>, sqlx::Error> {
    sqlx::query_as::<_, Brand>(
        r#"
        SELECT id, name, country_code
        FROM brands
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(conn)
    .await
}

/// Resolve a category by exact name
pub async fn category_by_name(
    conn: &mut PgConnection,
    name: &str,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name
        FROM categories
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(conn)
    .await
}

/// Categories attached to a product, in stable id order
pub async fn categories_for_product(
    conn: &mut PgConnection,
    product_id: i32,
) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT c.id, c.name
        FROM categories c
        JOIN products_categories pc ON pc.category_id = c.id
        WHERE pc.product_id = $1
        ORDER BY c.id
        "#,
    )
    .bind(product_id)
    .fetch_all(conn)
    .await
}
