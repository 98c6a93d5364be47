//! Shop (product) orders

use rust_decimal::Decimal;
use shared::models::ProductOrder;
use sqlx::PgPool;

use super::StoreResult;

pub struct NewProductOrder<'a> {
    pub username: &'a str,
    pub phone_number: &'a str,
    pub order_details: &'a str,
    pub total_price: Decimal,
    pub status: &'a str,
    pub email: Option<&'a str>,
}

pub async fn create(pool: &PgPool, order: &NewProductOrder<'_>) -> StoreResult<ProductOrder> {
    let row = sqlx::query_as(
        r#"
        INSERT INTO product_orders (username, phone_number, order_details, total_price, status, email)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, username, phone_number, order_details, total_price, status, email
        "#,
    )
    .bind(order.username)
    .bind(order.phone_number)
    .bind(order.order_details)
    .bind(order.total_price)
    .bind(order.status)
    .bind(order.email)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn find_all(pool: &PgPool) -> StoreResult<Vec<ProductOrder>> {
    let rows = sqlx::query_as(
        "SELECT id, username, phone_number, order_details, total_price, status, email FROM product_orders ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn delete(pool: &PgPool, id: i64) -> StoreResult<u64> {
    let rows = sqlx::query("DELETE FROM product_orders WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows)
}
