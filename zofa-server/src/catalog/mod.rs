//! Catalog write paths
//!
//! - [`ProductWriter`]: create/delete a product across its four tables atomically
//! - [`replace_categories`]: replace-all of a product's category links
//! - [`update_stock`]: flip the stock flag and notify live clients after commit

mod associations;
mod stock;
mod writer;

pub use associations::replace_categories;
pub use stock::update_stock;
pub use writer::ProductWriter;

use thiserror::Error;

use crate::db::{CatalogTx, StoreError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product {0} already exists")]
    AlreadyExists(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Roll back after `cause`, keeping `cause` as the reported error.
async fn abort(tx: Box<dyn CatalogTx>, product_id: &str, cause: StoreError) -> StoreError {
    if let Err(rollback_err) = tx.rollback().await {
        tracing::error!(
            product_id = %product_id,
            error = %rollback_err,
            cause = %cause,
            "Rollback failed"
        );
    }
    cause
}
