//! Database access layer
//!
//! ```text
//!            ┌──────────────────────┐
//!            │ CatalogStore / Tx    │  ◄── multi-table product writes
//!            └──────────┬───────────┘
//!                 ┌─────┴──────┐
//!                 ▼            ▼
//!             PgStore     MemoryStore
//!           (PostgreSQL)  (in-process, tests)
//! ```
//!
//! Single-table CRUD lives in plain async functions taking `&PgPool`
//! (`bread`, `categories`, `coupons`, `notes`, `orders`, `products`, `users`).

pub mod bread;
pub mod categories;
pub mod coupons;
#[cfg(test)]
pub mod memory;
pub mod notes;
pub mod orders;
pub mod postgres;
pub mod products;
pub mod users;

#[cfg(test)]
pub use memory::{MemoryStore, Statement};
pub use postgres::PgStore;

use async_trait::async_trait;
use shared::models::{NutritionalValues, Product, ProductDetails};
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("Duplicate: {0}")]
    Conflict(String),

    /// No connection became available within the acquire timeout
    #[error("Timed out waiting for a database connection")]
    PoolTimeout,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => StoreError::PoolTimeout,
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(db.constraint().unwrap_or(db.message()).to_string())
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Transactional access to the four catalog tables.
///
/// `begin` hands out one dedicated connection for the whole transaction.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Start a transaction on a freshly acquired connection
    async fn begin(&self) -> StoreResult<Box<dyn CatalogTx>>;

    /// Set the stock flag of one product (autocommit). Returns affected rows.
    async fn update_stock(&self, product_id: &str, stock: i16) -> StoreResult<u64>;

    async fn product_exists(&self, product_id: &str) -> StoreResult<bool>;

    /// Product with category names, nutrition and health-marking names
    async fn product_details(&self, product_id: &str) -> StoreResult<Option<ProductDetails>>;
}

/// One open transaction.
///
/// Dropping it without `commit` rolls back and releases the connection.
#[async_trait]
pub trait CatalogTx: Send {
    async fn insert_product(&mut self, product: &Product) -> StoreResult<()>;

    async fn insert_nutrition(&mut self, values: &NutritionalValues) -> StoreResult<()>;

    async fn insert_product_categories(
        &mut self,
        product_id: &str,
        category_ids: &[i64],
    ) -> StoreResult<u64>;

    async fn insert_product_health_markings(
        &mut self,
        product_id: &str,
        health_marking_ids: &[i64],
    ) -> StoreResult<u64>;

    async fn delete_product_categories(&mut self, product_id: &str) -> StoreResult<u64>;

    async fn delete_product_health_markings(&mut self, product_id: &str) -> StoreResult<u64>;

    async fn delete_nutrition(&mut self, product_id: &str) -> StoreResult<u64>;

    async fn delete_product(&mut self, product_id: &str) -> StoreResult<u64>;

    async fn commit(self: Box<Self>) -> StoreResult<()>;

    async fn rollback(self: Box<Self>) -> StoreResult<()>;
}
