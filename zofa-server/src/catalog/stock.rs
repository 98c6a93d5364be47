use shared::live::StockChange;

use crate::db::{CatalogStore, StoreResult};
use crate::live::StockBroadcaster;

/// Set the stock flag and, once the update has committed and hit a row,
/// push the change to live subscribers. Returns whether a product was updated.
pub async fn update_stock(
    store: &dyn CatalogStore,
    live: &StockBroadcaster,
    product_id: &str,
    stock: i16,
) -> StoreResult<bool> {
    let affected = store.update_stock(product_id, stock).await?;
    if affected == 0 {
        return Ok(false);
    }

    let receivers = live.publish_stock(StockChange {
        product_id: product_id.to_string(),
        stock,
    });
    tracing::info!(product_id = %product_id, stock, receivers, "Stock updated");
    Ok(true)
}
