//! PostgreSQL catalog store

use std::time::Duration;

use async_trait::async_trait;
use shared::models::{NutritionalValues, Product, ProductDetails};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};

use super::{CatalogStore, CatalogTx, StoreResult};

/// Build the shared pool with an explicit size cap and acquire timeout.
pub async fn connect_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn begin(&self) -> StoreResult<Box<dyn CatalogTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgCatalogTx { tx }))
    }

    async fn update_stock(&self, product_id: &str, stock: i16) -> StoreResult<u64> {
        let rows = sqlx::query("UPDATE products SET in_stock = $1 WHERE id = $2")
            .bind(stock)
            .bind(product_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows)
    }

    async fn product_exists(&self, product_id: &str) -> StoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn product_details(&self, product_id: &str) -> StoreResult<Option<ProductDetails>> {
        let product: Option<Product> = sqlx::query_as("SELECT * FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(product) = product else {
            return Ok(None);
        };

        let categories: Vec<String> = sqlx::query_scalar(
            "SELECT c.name FROM category c JOIN product_category pc ON pc.category_id = c.id WHERE pc.product_id = $1 ORDER BY c.id",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        let nutritional_values: Option<NutritionalValues> =
            sqlx::query_as("SELECT * FROM nutritional_values WHERE id = $1")
                .bind(product_id)
                .fetch_optional(&self.pool)
                .await?;

        let health_marking: Vec<String> = sqlx::query_scalar(
            "SELECT h.name FROM health_marking h JOIN product_health_marking ph ON ph.health_marking_id = h.id WHERE ph.product_id = $1 ORDER BY h.id",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ProductDetails {
            product,
            categories,
            nutritional_values,
            health_marking,
        }))
    }
}

/// Transaction pinned to one pooled connection
pub struct PgCatalogTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl CatalogTx for PgCatalogTx {
    async fn insert_product(&mut self, product: &Product) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, data, components, additional_features, contain,
                may_contain, allergies, price, in_stock, is_beverage, is_seeds
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.data)
        .bind(&product.components)
        .bind(&product.additional_features)
        .bind(&product.contain)
        .bind(&product.may_contain)
        .bind(&product.allergies)
        .bind(product.price)
        .bind(product.in_stock)
        .bind(product.is_beverage)
        .bind(product.is_seeds)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn insert_nutrition(&mut self, values: &NutritionalValues) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO nutritional_values (
                id, energy, total_fats, of_which_f, saturated_fatty_acids,
                trans_fatty_acids, cholesterol, sodium, total_carbs, of_which_c,
                sugar, sugar_teaspoons, sugar_alcohols, dietary_fibers, proteins,
                calcium, iron
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(&values.id)
        .bind(values.energy)
        .bind(values.total_fats)
        .bind(values.of_which_f)
        .bind(values.saturated_fatty_acids)
        .bind(values.trans_fatty_acids)
        .bind(values.cholesterol)
        .bind(values.sodium)
        .bind(values.total_carbs)
        .bind(values.of_which_c)
        .bind(values.sugar)
        .bind(values.sugar_teaspoons)
        .bind(values.sugar_alcohols)
        .bind(values.dietary_fibers)
        .bind(values.proteins)
        .bind(values.calcium)
        .bind(values.iron)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn insert_product_categories(
        &mut self,
        product_id: &str,
        category_ids: &[i64],
    ) -> StoreResult<u64> {
        if category_ids.is_empty() {
            return Ok(0);
        }
        let product_ids: Vec<String> = category_ids.iter().map(|_| product_id.to_string()).collect();
        let rows = sqlx::query(
            "INSERT INTO product_category (product_id, category_id) SELECT * FROM UNNEST($1::text[], $2::bigint[])",
        )
        .bind(&product_ids)
        .bind(category_ids)
        .execute(&mut *self.tx)
        .await?
        .rows_affected();
        Ok(rows)
    }

    async fn insert_product_health_markings(
        &mut self,
        product_id: &str,
        health_marking_ids: &[i64],
    ) -> StoreResult<u64> {
        if health_marking_ids.is_empty() {
            return Ok(0);
        }
        let product_ids: Vec<String> = health_marking_ids
            .iter()
            .map(|_| product_id.to_string())
            .collect();
        let rows = sqlx::query(
            "INSERT INTO product_health_marking (product_id, health_marking_id) SELECT * FROM UNNEST($1::text[], $2::bigint[])",
        )
        .bind(&product_ids)
        .bind(health_marking_ids)
        .execute(&mut *self.tx)
        .await?
        .rows_affected();
        Ok(rows)
    }

    async fn delete_product_categories(&mut self, product_id: &str) -> StoreResult<u64> {
        let rows = sqlx::query("DELETE FROM product_category WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        Ok(rows)
    }

    async fn delete_product_health_markings(&mut self, product_id: &str) -> StoreResult<u64> {
        let rows = sqlx::query("DELETE FROM product_health_marking WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        Ok(rows)
    }

    async fn delete_nutrition(&mut self, product_id: &str) -> StoreResult<u64> {
        let rows = sqlx::query("DELETE FROM nutritional_values WHERE id = $1")
            .bind(product_id)
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        Ok(rows)
    }

    async fn delete_product(&mut self, product_id: &str) -> StoreResult<u64> {
        let rows = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        Ok(rows)
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
