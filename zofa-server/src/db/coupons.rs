use shared::models::Coupon;
use sqlx::PgPool;

use super::StoreResult;

pub async fn create(pool: &PgPool, code: &str, percentage: i32) -> StoreResult<Coupon> {
    let row = sqlx::query_as(
        "INSERT INTO coupons (code, percentage) VALUES ($1, $2) RETURNING id, code, percentage",
    )
    .bind(code)
    .bind(percentage)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn find_all(pool: &PgPool) -> StoreResult<Vec<Coupon>> {
    let rows = sqlx::query_as("SELECT id, code, percentage FROM coupons ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Discount percentage of `code`, if the coupon exists
pub async fn find_percentage(pool: &PgPool, code: &str) -> StoreResult<Option<i32>> {
    let percentage = sqlx::query_scalar("SELECT percentage FROM coupons WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(percentage)
}

pub async fn delete(pool: &PgPool, id: i64) -> StoreResult<u64> {
    let rows = sqlx::query("DELETE FROM coupons WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows)
}
