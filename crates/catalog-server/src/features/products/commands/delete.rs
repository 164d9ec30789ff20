//! Delete product command
//!
//! Idempotent: deleting an id that does not exist is a successful no-op.
//! Category memberships go with the row via the join table's FK cascade.

use sqlx::PgPool;

/// Errors that can occur when deleting a product
#[derive(Debug, thiserror::Error)]
pub enum DeleteProductError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function for deleting products
///
/// Returns whether a row was actually removed.
#[tracing::instrument(skip(pool), fields(product_id = %id))]
pub async fn handle(pool: PgPool, id: i32) -> Result<bool, DeleteProductError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        tracing::debug!(product_id = %id, "Product deleted");
    }

    Ok(deleted)
}
