//! In-process catalog store
//!
//! Mirrors the PostgreSQL store closely enough to exercise transaction
//! behaviour without a database:
//! - a bounded pool of "connections" (semaphore permits, acquire timeout)
//! - one writer at a time; a transaction holds the table lock until it ends
//! - rollback restores the snapshot taken at `begin`, also on drop
//! - statement log and fault injection for ordering / failure tests

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use shared::models::{NutritionalValues, Product, ProductDetails};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard, OwnedSemaphorePermit, Semaphore};

use super::{CatalogStore, CatalogTx, StoreError, StoreResult};

/// Statements the store has been asked to run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    InsertProduct,
    InsertNutrition,
    InsertProductCategories,
    InsertProductHealthMarkings,
    DeleteProductCategories,
    DeleteProductHealthMarkings,
    DeleteNutrition,
    DeleteProduct,
    UpdateStock,
    Commit,
    Rollback,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    products: BTreeMap<String, Product>,
    nutrition: BTreeMap<String, NutritionalValues>,
    product_category: Vec<(String, i64)>,
    product_health_marking: Vec<(String, i64)>,
    categories: BTreeMap<i64, String>,
    health_markings: BTreeMap<i64, String>,
}

#[derive(Default)]
struct Faults {
    /// 1-based statement index (within a transaction) that fails; 0 = none
    fail_at: AtomicUsize,
    fail_rollback: AtomicBool,
}

#[derive(Clone)]
pub struct MemoryStore {
    tables: Arc<AsyncMutex<Tables>>,
    connections: Arc<Semaphore>,
    acquire_timeout: Duration,
    faults: Arc<Faults>,
    log: Arc<Mutex<Vec<Statement>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(4, Duration::from_secs(1))
    }
}

impl MemoryStore {
    pub fn new(max_connections: usize, acquire_timeout: Duration) -> Self {
        Self {
            tables: Arc::new(AsyncMutex::new(Tables::default())),
            connections: Arc::new(Semaphore::new(max_connections)),
            acquire_timeout,
            faults: Arc::new(Faults::default()),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seed the category lookup table
    pub async fn with_categories(self, categories: &[(i64, &str)]) -> Self {
        {
            let mut t = self.tables.lock().await;
            for (id, name) in categories {
                t.categories.insert(*id, name.to_string());
            }
        }
        self
    }

    /// Seed the health-marking lookup table
    pub async fn with_health_markings(self, markings: &[(i64, &str)]) -> Self {
        {
            let mut t = self.tables.lock().await;
            for (id, name) in markings {
                t.health_markings.insert(*id, name.to_string());
            }
        }
        self
    }

    /// Make the `n`-th statement of every following transaction fail (0 disables)
    pub fn fail_on_statement(&self, n: usize) {
        self.faults.fail_at.store(n, Ordering::SeqCst);
    }

    /// Make rollbacks report failure (the snapshot is still restored)
    pub fn fail_rollback(&self, fail: bool) {
        self.faults.fail_rollback.store(fail, Ordering::SeqCst);
    }

    /// Connections currently available in the pool
    pub fn available_connections(&self) -> usize {
        self.connections.available_permits()
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.log.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn clear_statements(&self) {
        if let Ok(mut l) = self.log.lock() {
            l.clear();
        }
    }

    pub async fn product(&self, id: &str) -> Option<Product> {
        self.tables.lock().await.products.get(id).cloned()
    }

    pub async fn nutrition(&self, id: &str) -> Option<NutritionalValues> {
        self.tables.lock().await.nutrition.get(id).cloned()
    }

    /// Category ids linked to `product_id`, in insertion order
    pub async fn category_links(&self, product_id: &str) -> Vec<i64> {
        let t = self.tables.lock().await;
        t.product_category
            .iter()
            .filter(|(p, _)| p == product_id)
            .map(|(_, c)| *c)
            .collect()
    }

    /// Health-marking ids linked to `product_id`, in insertion order
    pub async fn health_marking_links(&self, product_id: &str) -> Vec<i64> {
        let t = self.tables.lock().await;
        t.product_health_marking
            .iter()
            .filter(|(p, _)| p == product_id)
            .map(|(_, h)| *h)
            .collect()
    }

    async fn acquire(&self) -> StoreResult<OwnedSemaphorePermit> {
        match tokio::time::timeout(self.acquire_timeout, self.connections.clone().acquire_owned())
            .await
        {
            Ok(Ok(permit)) => Ok(permit),
            Ok(Err(_)) => Err(StoreError::Database("pool closed".into())),
            Err(_) => Err(StoreError::PoolTimeout),
        }
    }

    fn record(&self, statement: Statement) {
        if let Ok(mut l) = self.log.lock() {
            l.push(statement);
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn begin(&self) -> StoreResult<Box<dyn CatalogTx>> {
        let permit = self.acquire().await?;
        let guard = self.tables.clone().lock_owned().await;
        let snapshot = guard.clone();
        Ok(Box::new(MemoryTx {
            store: self.clone(),
            tables: guard,
            snapshot: Some(snapshot),
            executed: 0,
            _permit: permit,
        }))
    }

    async fn update_stock(&self, product_id: &str, stock: i16) -> StoreResult<u64> {
        let _permit = self.acquire().await?;
        let mut t = self.tables.lock().await;
        self.record(Statement::UpdateStock);
        match t.products.get_mut(product_id) {
            Some(p) => {
                p.in_stock = stock;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn product_exists(&self, product_id: &str) -> StoreResult<bool> {
        let _permit = self.acquire().await?;
        Ok(self.tables.lock().await.products.contains_key(product_id))
    }

    async fn product_details(&self, product_id: &str) -> StoreResult<Option<ProductDetails>> {
        let _permit = self.acquire().await?;
        let t = self.tables.lock().await;
        let Some(product) = t.products.get(product_id).cloned() else {
            return Ok(None);
        };
        let categories = t
            .product_category
            .iter()
            .filter(|(p, _)| p == product_id)
            .filter_map(|(_, c)| t.categories.get(c).cloned())
            .collect();
        let health_marking = t
            .product_health_marking
            .iter()
            .filter(|(p, _)| p == product_id)
            .filter_map(|(_, h)| t.health_markings.get(h).cloned())
            .collect();
        Ok(Some(ProductDetails {
            product,
            categories,
            nutritional_values: t.nutrition.get(product_id).cloned(),
            health_marking,
        }))
    }
}

pub struct MemoryTx {
    store: MemoryStore,
    tables: OwnedMutexGuard<Tables>,
    /// State at `begin`; `None` once committed
    snapshot: Option<Tables>,
    executed: usize,
    _permit: OwnedSemaphorePermit,
}

impl MemoryTx {
    fn step(&mut self, statement: Statement) -> StoreResult<()> {
        self.executed += 1;
        self.store.record(statement);
        if self.store.faults.fail_at.load(Ordering::SeqCst) == self.executed {
            return Err(StoreError::Database(format!(
                "injected failure at statement {} ({statement:?})",
                self.executed
            )));
        }
        Ok(())
    }

    fn restore(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.tables = snapshot;
        }
    }
}

impl Drop for MemoryTx {
    fn drop(&mut self) {
        self.restore();
    }
}

#[async_trait]
impl CatalogTx for MemoryTx {
    async fn insert_product(&mut self, product: &Product) -> StoreResult<()> {
        self.step(Statement::InsertProduct)?;
        if self.tables.products.contains_key(&product.id) {
            return Err(StoreError::Conflict("products_pkey".into()));
        }
        self.tables
            .products
            .insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn insert_nutrition(&mut self, values: &NutritionalValues) -> StoreResult<()> {
        self.step(Statement::InsertNutrition)?;
        if self.tables.nutrition.contains_key(&values.id) {
            return Err(StoreError::Conflict("nutritional_values_pkey".into()));
        }
        self.tables
            .nutrition
            .insert(values.id.clone(), values.clone());
        Ok(())
    }

    async fn insert_product_categories(
        &mut self,
        product_id: &str,
        category_ids: &[i64],
    ) -> StoreResult<u64> {
        self.step(Statement::InsertProductCategories)?;
        self.tables
            .product_category
            .extend(category_ids.iter().map(|c| (product_id.to_string(), *c)));
        Ok(category_ids.len() as u64)
    }

    async fn insert_product_health_markings(
        &mut self,
        product_id: &str,
        health_marking_ids: &[i64],
    ) -> StoreResult<u64> {
        self.step(Statement::InsertProductHealthMarkings)?;
        self.tables
            .product_health_marking
            .extend(health_marking_ids.iter().map(|h| (product_id.to_string(), *h)));
        Ok(health_marking_ids.len() as u64)
    }

    async fn delete_product_categories(&mut self, product_id: &str) -> StoreResult<u64> {
        self.step(Statement::DeleteProductCategories)?;
        let before = self.tables.product_category.len();
        self.tables.product_category.retain(|(p, _)| p != product_id);
        Ok((before - self.tables.product_category.len()) as u64)
    }

    async fn delete_product_health_markings(&mut self, product_id: &str) -> StoreResult<u64> {
        self.step(Statement::DeleteProductHealthMarkings)?;
        let before = self.tables.product_health_marking.len();
        self.tables
            .product_health_marking
            .retain(|(p, _)| p != product_id);
        Ok((before - self.tables.product_health_marking.len()) as u64)
    }

    async fn delete_nutrition(&mut self, product_id: &str) -> StoreResult<u64> {
        self.step(Statement::DeleteNutrition)?;
        Ok(u64::from(self.tables.nutrition.remove(product_id).is_some()))
    }

    async fn delete_product(&mut self, product_id: &str) -> StoreResult<u64> {
        self.step(Statement::DeleteProduct)?;
        Ok(u64::from(self.tables.products.remove(product_id).is_some()))
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let mut tx = self;
        tx.store.record(Statement::Commit);
        tx.snapshot = None;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        let mut tx = self;
        tx.store.record(Statement::Rollback);
        tx.restore();
        if tx.store.faults.fail_rollback.load(Ordering::SeqCst) {
            return Err(StoreError::Database("injected rollback failure".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: id.into(),
            name: "Test".into(),
            data: None,
            components: None,
            additional_features: None,
            contain: None,
            may_contain: None,
            allergies: None,
            price: Default::default(),
            in_stock: 1,
            is_beverage: 0,
            is_seeds: 0,
        }
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back_and_frees_connection() {
        let store = MemoryStore::new(2, Duration::from_millis(50));
        {
            let mut tx = store.begin().await.unwrap();
            tx.insert_product(&product("P1")).await.unwrap();
            assert_eq!(store.available_connections(), 1);
        }
        assert_eq!(store.available_connections(), 2);
        assert!(store.product("P1").await.is_none());
    }

    #[tokio::test]
    async fn commit_keeps_changes() {
        let store = MemoryStore::default();
        let mut tx = store.begin().await.unwrap();
        tx.insert_product(&product("P1")).await.unwrap();
        tx.commit().await.unwrap();
        assert!(store.product("P1").await.is_some());
        assert_eq!(
            store.statements(),
            vec![Statement::InsertProduct, Statement::Commit]
        );
    }

    #[tokio::test]
    async fn exhausted_pool_times_out() {
        let store = MemoryStore::new(1, Duration::from_millis(20));
        let _held = store.begin().await.unwrap();
        let err = store.update_stock("P1", 1).await.unwrap_err();
        assert!(matches!(err, StoreError::PoolTimeout));
    }

    #[tokio::test]
    async fn injected_fault_fails_the_nth_statement() {
        let store = MemoryStore::default();
        store.fail_on_statement(2);
        let mut tx = store.begin().await.unwrap();
        tx.insert_product(&product("P1")).await.unwrap();
        let err = tx
            .insert_nutrition(&NutritionalValues {
                id: "P1".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[tokio::test]
    async fn duplicate_product_is_a_conflict() {
        let store = MemoryStore::default();
        let mut tx = store.begin().await.unwrap();
        tx.insert_product(&product("P1")).await.unwrap();
        let err = tx.insert_product(&product("P1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }
}
