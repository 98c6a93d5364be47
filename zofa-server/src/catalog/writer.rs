use std::sync::Arc;

use shared::models::ProductCreate;

use super::{CatalogError, abort};
use crate::db::{CatalogStore, CatalogTx, StoreError, StoreResult};

/// Owns the multi-table product writes.
///
/// Create inserts product → nutrition → category links → health-marking links;
/// delete removes category links → health-marking links → nutrition → product.
/// Both run in a single transaction on one connection.
#[derive(Clone)]
pub struct ProductWriter {
    store: Arc<dyn CatalogStore>,
}

impl ProductWriter {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, product: &ProductCreate) -> Result<(), CatalogError> {
        let barcode = product.barcode.as_str();
        let mut tx = self.store.begin().await?;

        let inserted = insert_all(tx.as_mut(), product).await;
        if let Err(e) = inserted {
            let cause = abort(tx, barcode, e).await;
            return Err(match cause {
                StoreError::Conflict(_) => CatalogError::AlreadyExists(barcode.to_string()),
                other => CatalogError::Store(other),
            });
        }

        tx.commit().await?;
        tracing::info!(
            product_id = %barcode,
            categories = product.categories.len(),
            health_markings = product.health_symbols.len(),
            "Product created"
        );
        Ok(())
    }

    /// Returns the number of product rows removed (0 when the id is unknown).
    pub async fn delete_by_id(&self, product_id: &str) -> Result<u64, CatalogError> {
        let mut tx = self.store.begin().await?;

        let deleted = delete_all(tx.as_mut(), product_id).await;
        let removed = match deleted {
            Ok(n) => n,
            Err(e) => return Err(abort(tx, product_id, e).await.into()),
        };

        tx.commit().await?;
        if removed > 0 {
            tracing::info!(product_id = %product_id, "Product deleted");
        }
        Ok(removed)
    }
}

async fn insert_all(tx: &mut dyn CatalogTx, product: &ProductCreate) -> StoreResult<()> {
    let barcode = product.barcode.as_str();
    tx.insert_product(&product.product()).await?;
    tx.insert_nutrition(&product.nutrition()).await?;
    tx.insert_product_categories(barcode, &product.categories)
        .await?;
    tx.insert_product_health_markings(barcode, &product.health_symbols)
        .await?;
    Ok(())
}

async fn delete_all(tx: &mut dyn CatalogTx, product_id: &str) -> StoreResult<u64> {
    tx.delete_product_categories(product_id).await?;
    tx.delete_product_health_markings(product_id).await?;
    tx.delete_nutrition(product_id).await?;
    tx.delete_product(product_id).await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::catalog::test_support::new_product;
    use crate::db::{MemoryStore, Statement};

    async fn seeded_store() -> MemoryStore {
        MemoryStore::new(2, Duration::from_millis(100))
            .with_categories(&[(1, "Bakery"), (2, "Whole grain"), (3, "Drinks")])
            .await
            .with_health_markings(&[(10, "High sodium"), (11, "High sugar")])
            .await
    }

    fn writer(store: &MemoryStore) -> ProductWriter {
        ProductWriter::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn create_writes_all_four_tables_in_order() {
        let store = seeded_store().await;
        writer(&store)
            .create(&new_product("B001", vec![1, 2], vec![10]))
            .await
            .unwrap();

        assert!(store.product("B001").await.is_some());
        assert_eq!(store.nutrition("B001").await.unwrap().energy, Some(250.0));
        assert_eq!(store.category_links("B001").await, vec![1, 2]);
        assert_eq!(store.health_marking_links("B001").await, vec![10]);
        assert_eq!(
            store.statements(),
            vec![
                Statement::InsertProduct,
                Statement::InsertNutrition,
                Statement::InsertProductCategories,
                Statement::InsertProductHealthMarkings,
                Statement::Commit,
            ]
        );
    }

    #[tokio::test]
    async fn failed_health_marking_insert_leaves_nothing_behind() {
        let store = seeded_store().await;
        store.fail_on_statement(4);

        let err = writer(&store)
            .create(&new_product("B002", vec![1, 2], vec![10]))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Store(StoreError::Database(_))));
        assert!(store.product("B002").await.is_none());
        assert!(store.nutrition("B002").await.is_none());
        assert!(store.category_links("B002").await.is_empty());
        assert!(store.health_marking_links("B002").await.is_empty());
        assert_eq!(store.statements().last(), Some(&Statement::Rollback));
    }

    #[tokio::test]
    async fn failed_third_insert_returns_connection_to_pool() {
        let store = seeded_store().await;
        let before = store.available_connections();
        store.fail_on_statement(3);

        let result = writer(&store)
            .create(&new_product("B003", vec![1], vec![]))
            .await;

        assert!(result.is_err());
        assert_eq!(store.available_connections(), before);
    }

    #[tokio::test]
    async fn duplicate_barcode_is_reported_and_original_kept() {
        let store = seeded_store().await;
        let w = writer(&store);
        w.create(&new_product("B004", vec![1], vec![])).await.unwrap();

        let mut dup = new_product("B004", vec![2, 3], vec![11]);
        dup.name = "Impostor".into();
        let err = w.create(&dup).await.unwrap_err();

        assert!(matches!(err, CatalogError::AlreadyExists(ref id) if id == "B004"));
        assert_eq!(store.product("B004").await.unwrap().name, "Product B004");
        assert_eq!(store.category_links("B004").await, vec![1]);
        assert!(store.health_marking_links("B004").await.is_empty());
    }

    #[tokio::test]
    async fn rollback_failure_does_not_mask_original_error() {
        let store = seeded_store().await;
        store.fail_on_statement(2);
        store.fail_rollback(true);

        let err = writer(&store)
            .create(&new_product("B005", vec![], vec![]))
            .await
            .unwrap_err();

        match err {
            CatalogError::Store(StoreError::Database(msg)) => {
                assert!(msg.contains("statement 2"), "unexpected message: {msg}");
            }
            other => panic!("expected injected insert failure, got {other:?}"),
        }
        assert!(store.product("B005").await.is_none());
    }

    #[tokio::test]
    async fn delete_removes_children_before_parent() {
        let store = seeded_store().await;
        let w = writer(&store);
        w.create(&new_product("B006", vec![1, 3], vec![10, 11]))
            .await
            .unwrap();
        store.clear_statements();

        let removed = w.delete_by_id("B006").await.unwrap();

        assert_eq!(removed, 1);
        assert_eq!(
            store.statements(),
            vec![
                Statement::DeleteProductCategories,
                Statement::DeleteProductHealthMarkings,
                Statement::DeleteNutrition,
                Statement::DeleteProduct,
                Statement::Commit,
            ]
        );
        assert!(store.category_links("B006").await.is_empty());
        assert!(store.health_marking_links("B006").await.is_empty());
        assert!(store.nutrition("B006").await.is_none());
    }

    #[tokio::test]
    async fn delete_of_missing_product_reports_zero() {
        let store = seeded_store().await;
        assert_eq!(writer(&store).delete_by_id("nope").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_delete_rolls_back_every_step() {
        let store = seeded_store().await;
        let w = writer(&store);
        w.create(&new_product("B007", vec![1], vec![10])).await.unwrap();
        store.fail_on_statement(3);

        assert!(w.delete_by_id("B007").await.is_err());

        assert!(store.product("B007").await.is_some());
        assert_eq!(store.category_links("B007").await, vec![1]);
        assert_eq!(store.health_marking_links("B007").await, vec![10]);
    }

    #[tokio::test]
    async fn create_then_delete_round_trip_through_details() {
        let store = seeded_store().await;
        let w = writer(&store);
        w.create(&new_product("B001", vec![1, 2], vec![11]))
            .await
            .unwrap();

        let details = store.product_details("B001").await.unwrap().unwrap();
        assert_eq!(details.categories, vec!["Bakery", "Whole grain"]);
        assert_eq!(details.health_marking, vec!["High sugar"]);
        assert_eq!(
            details.nutritional_values.as_ref().and_then(|n| n.proteins),
            Some(8.5)
        );

        assert_eq!(w.delete_by_id("B001").await.unwrap(), 1);
        assert!(store.product_details("B001").await.unwrap().is_none());
    }
}
