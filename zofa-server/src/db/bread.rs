//! Bread types and bread orders

use rust_decimal::Decimal;
use shared::models::{BreadOrder, BreadType};
use sqlx::PgPool;

use super::StoreResult;

pub async fn create_type(
    pool: &PgPool,
    name: &str,
    price: Decimal,
    quantity: i32,
) -> StoreResult<BreadType> {
    let row = sqlx::query_as(
        "INSERT INTO bread (name, price, quantity) VALUES ($1, $2, $3) RETURNING id, name, price, quantity",
    )
    .bind(name)
    .bind(price)
    .bind(quantity)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn find_all_types(pool: &PgPool) -> StoreResult<Vec<BreadType>> {
    let rows = sqlx::query_as("SELECT id, name, price, quantity FROM bread ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn delete_type(pool: &PgPool, id: i64) -> StoreResult<u64> {
    let rows = sqlx::query("DELETE FROM bread WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows)
}

/// Fields of a new bread order, already normalized
pub struct NewBreadOrder<'a> {
    pub username: &'a str,
    pub phone_number: &'a str,
    pub order_details: &'a str,
    pub total_price: Decimal,
    pub status: &'a str,
    pub day: &'a str,
}

pub async fn create_order(pool: &PgPool, order: &NewBreadOrder<'_>) -> StoreResult<BreadOrder> {
    let row = sqlx::query_as(
        r#"
        INSERT INTO bread_orders (username, phone_number, order_details, total_price, status, day)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, username, phone_number, order_details, total_price, status, day
        "#,
    )
    .bind(order.username)
    .bind(order.phone_number)
    .bind(order.order_details)
    .bind(order.total_price)
    .bind(order.status)
    .bind(order.day)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// All orders, or only those of `day`
pub async fn find_orders(pool: &PgPool, day: Option<&str>) -> StoreResult<Vec<BreadOrder>> {
    let rows = sqlx::query_as(
        r#"
        SELECT id, username, phone_number, order_details, total_price, status, day
        FROM bread_orders
        WHERE $1::text IS NULL OR day = $1
        ORDER BY id
        "#,
    )
    .bind(day)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn set_order_status(pool: &PgPool, id: i64, status: &str) -> StoreResult<u64> {
    let rows = sqlx::query("UPDATE bread_orders SET status = $1 WHERE id = $2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows)
}

pub async fn set_order_price(pool: &PgPool, id: i64, price: Decimal) -> StoreResult<u64> {
    let rows = sqlx::query("UPDATE bread_orders SET total_price = $1 WHERE id = $2")
        .bind(price)
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows)
}

pub async fn delete_order(pool: &PgPool, id: i64) -> StoreResult<u64> {
    let rows = sqlx::query("DELETE FROM bread_orders WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows)
}
