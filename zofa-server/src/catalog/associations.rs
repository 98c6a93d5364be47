use crate::db::{CatalogStore, CatalogTx, StoreResult};

use super::{CatalogError, abort};

/// Replace every category link of `product_id` with `category_ids`.
///
/// Delete and insert share one transaction, so readers see either the old
/// set or the new one. An empty slice clears the links.
pub async fn replace_categories(
    store: &dyn CatalogStore,
    product_id: &str,
    category_ids: &[i64],
) -> Result<u64, CatalogError> {
    let mut tx = store.begin().await?;

    let replaced = relink(tx.as_mut(), product_id, category_ids).await;
    let inserted = match replaced {
        Ok(n) => n,
        Err(e) => return Err(abort(tx, product_id, e).await.into()),
    };

    tx.commit().await?;
    tracing::debug!(product_id = %product_id, categories = inserted, "Product categories replaced");
    Ok(inserted)
}

async fn relink(tx: &mut dyn CatalogTx, product_id: &str, category_ids: &[i64]) -> StoreResult<u64> {
    tx.delete_product_categories(product_id).await?;
    tx.insert_product_categories(product_id, category_ids).await
}
