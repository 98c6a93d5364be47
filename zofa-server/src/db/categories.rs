use shared::models::Category;
use sqlx::PgPool;

use super::StoreResult;

pub async fn create(pool: &PgPool, name: &str) -> StoreResult<Category> {
    let row = sqlx::query_as("INSERT INTO category (name) VALUES ($1) RETURNING id, name")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(row)
}

pub async fn find_all(pool: &PgPool) -> StoreResult<Vec<Category>> {
    let rows = sqlx::query_as("SELECT id, name FROM category ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Delete a category together with its product links. Returns removed categories.
pub async fn delete(pool: &PgPool, id: i64) -> StoreResult<u64> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM product_category WHERE category_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM category WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    tx.commit().await?;
    Ok(rows)
}
