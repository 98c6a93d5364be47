//! App users (push tokens) and admins

use shared::models::{Admin, User};
use sqlx::PgPool;

use super::StoreResult;

pub async fn create_user(
    pool: &PgPool,
    phone_number: &str,
    username: Option<&str>,
    fcm_token: &str,
) -> StoreResult<User> {
    let row = sqlx::query_as(
        r#"
        INSERT INTO users (phone_number, username, fcm_token)
        VALUES ($1, $2, $3)
        RETURNING phone_number, username, fcm_token
        "#,
    )
    .bind(phone_number)
    .bind(username)
    .bind(fcm_token)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn delete_user(pool: &PgPool, phone_number: &str) -> StoreResult<u64> {
    let rows = sqlx::query("DELETE FROM users WHERE phone_number = $1")
        .bind(phone_number)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows)
}

/// Push token registered for `phone_number`
pub async fn find_fcm_token(pool: &PgPool, phone_number: &str) -> StoreResult<Option<String>> {
    let token: Option<Option<String>> =
        sqlx::query_scalar("SELECT fcm_token FROM users WHERE phone_number = $1")
            .bind(phone_number)
            .fetch_optional(pool)
            .await?;
    Ok(token.flatten().filter(|t| !t.is_empty()))
}

pub async fn create_admin(
    pool: &PgPool,
    phone_number: &str,
    name: Option<&str>,
) -> StoreResult<Admin> {
    let row = sqlx::query_as(
        "INSERT INTO admins (phone_number, name) VALUES ($1, $2) RETURNING phone_number, name",
    )
    .bind(phone_number)
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn find_all_admins(pool: &PgPool) -> StoreResult<Vec<Admin>> {
    let rows = sqlx::query_as("SELECT phone_number, name FROM admins ORDER BY phone_number")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn delete_admin(pool: &PgPool, phone_number: &str) -> StoreResult<u64> {
    let rows = sqlx::query("DELETE FROM admins WHERE phone_number = $1")
        .bind(phone_number)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows)
}

pub async fn admin_exists(pool: &PgPool, phone_number: &str) -> StoreResult<bool> {
    let exists = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM admins WHERE phone_number = $1)")
        .bind(phone_number)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}
