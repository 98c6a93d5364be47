use shared::models::Note;
use sqlx::PgPool;

use super::StoreResult;

pub async fn create(pool: &PgPool, content: &str) -> StoreResult<Note> {
    let row = sqlx::query_as("INSERT INTO notes (content) VALUES ($1) RETURNING id, content")
        .bind(content)
        .fetch_one(pool)
        .await?;
    Ok(row)
}

pub async fn find_all(pool: &PgPool) -> StoreResult<Vec<Note>> {
    let rows = sqlx::query_as("SELECT id, content FROM notes ORDER BY id DESC")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn delete(pool: &PgPool, id: i64) -> StoreResult<u64> {
    let rows = sqlx::query("DELETE FROM notes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows)
}
