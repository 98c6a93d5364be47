//! Unified service-layer error type for zofa-server
//!
//! `ServiceError` bridges store, catalog and collaborator errors to the
//! API-layer `AppError`, so handlers can propagate with `?`.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::catalog::CatalogError;
use crate::db::StoreError;
use crate::push::PushError;
use crate::storage::StorageError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// - `Db`: database/infrastructure errors (logged, mapped to InternalError)
/// - `App`: business-rule errors (passed through to the client)
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    App(AppError),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::PoolTimeout => ServiceError::App(AppError::busy()),
            StoreError::Conflict(what) => {
                ServiceError::App(AppError::already_exists(format!("Duplicate: {what}")))
            }
            StoreError::Database(_) => ServiceError::Db(e.into()),
        }
    }
}

impl From<CatalogError> for ServiceError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::AlreadyExists(id) => ServiceError::App(AppError::with_message(
                ErrorCode::ProductExists,
                format!("Product {id} already exists"),
            )),
            CatalogError::Store(store) => store.into(),
        }
    }
}

impl From<StorageError> for ServiceError {
    fn from(e: StorageError) -> Self {
        tracing::error!(error = %e, "Object storage failure");
        ServiceError::App(AppError::new(ErrorCode::FileStorageFailed))
    }
}

impl From<PushError> for ServiceError {
    fn from(e: PushError) -> Self {
        tracing::error!(error = %e, "Push notification failure");
        ServiceError::App(AppError::with_message(ErrorCode::PushFailed, e.to_string()))
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
