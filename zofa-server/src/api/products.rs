//! Product endpoints
//!
//! Multi-table writes (create, delete, category replace) go through the
//! catalog store; reads and single-column edits use the pool directly.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    HealthMarking, Product, ProductCategoriesReplace, ProductCreate, ProductDetails,
    ProductFieldUpdate, ProductSearch, ProductSummary, ProductsByCategory, StockUpdate,
    WriteResult,
};

use super::{ApiResult, required_text};
use crate::catalog::{self, CatalogError};
use crate::db::products::{self as db_products, EditableField, FieldValue};
use crate::db::{CatalogStore, StoreError};
use crate::error::ServiceError;
use crate::state::AppState;
use crate::storage::{ObjectStore, image_key};

fn product_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::ProductNotFound, format!("Product {id} not found"))
        .with_detail("id", id)
}

fn validate_new_product(product: &ProductCreate) -> Result<(), AppError> {
    required_text(&product.barcode, "barcode")?;
    required_text(&product.name, "name")?;
    let price = product.price.ok_or_else(|| AppError::required("price"))?;
    if price < Decimal::ZERO {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            "price must not be negative",
        ));
    }
    Ok(())
}

/// POST /api/addNewProduct
pub async fn add_new_product(
    State(state): State<AppState>,
    Json(mut product): Json<ProductCreate>,
) -> Response {
    if let Err(e) = validate_new_product(&product) {
        return e.into_response();
    }
    product.barcode = product.barcode.trim().to_string();
    product.name = product.name.trim().to_string();

    match state.products().create(&product).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(WriteResult::ok("Product added successfully")),
        )
            .into_response(),
        Err(CatalogError::AlreadyExists(_)) => (
            StatusCode::CONFLICT,
            Json(WriteResult::failed("Product already exists")),
        )
            .into_response(),
        Err(CatalogError::Store(e)) => {
            tracing::error!(product_id = %product.barcode, error = %e, "Product create failed");
            let status = match e {
                StoreError::PoolTimeout => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(WriteResult::failed("Error adding product"))).into_response()
        }
    }
}

/// DELETE /api/deleteProduct/{id}
///
/// The picture is removed only after the rows are gone; a storage failure
/// at that point is reported but the delete stands.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ServiceError> {
    let removed = state.products().delete_by_id(&id).await?;
    if removed == 0 {
        return Err(product_not_found(&id).into());
    }

    let key = image_key(&state.image_key_prefix, &id);
    state.images.delete(&key).await?;

    Ok(ApiResponse::ok_with_message("Product deleted successfully"))
}

/// POST /api/saveProductCategories
pub async fn save_product_categories(
    State(state): State<AppState>,
    Json(req): Json<ProductCategoriesReplace>,
) -> Result<ApiResponse<()>, ServiceError> {
    let barcode = required_text(&req.barcode, "barcode")?;
    let categories = req.categories.ok_or_else(|| AppError::required("categories"))?;

    if !state.catalog.product_exists(barcode).await? {
        return Err(product_not_found(barcode).into());
    }
    let linked = catalog::replace_categories(state.catalog.as_ref(), barcode, &categories).await?;

    tracing::info!(product_id = %barcode, categories = linked, "Product categories saved");
    Ok(ApiResponse::ok_with_message("Categories saved successfully"))
}

/// PATCH /api/updateStock/{id}
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StockUpdate>,
) -> Result<ApiResponse<()>, ServiceError> {
    let stock = req.flag().ok_or_else(|| {
        AppError::with_message(ErrorCode::InvalidStockValue, "stock must be 0 or 1")
    })?;

    if !catalog::update_stock(state.catalog.as_ref(), &state.live, &id, stock).await? {
        return Err(product_not_found(&id).into());
    }
    Ok(ApiResponse::ok_with_message("Stock updated successfully"))
}

/// GET /api/getAllProducts
pub async fn get_all_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let products = db_products::find_all(&state.pool).await?;
    if products.is_empty() {
        return Err(AppError::with_message(ErrorCode::ProductNotFound, "No products found").into());
    }
    Ok(Json(products))
}

/// GET /api/getProductDetails/{id}
pub async fn get_product_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProductDetails> {
    let details = state
        .catalog
        .product_details(&id)
        .await?
        .ok_or_else(|| product_not_found(&id))?;
    Ok(Json(details))
}

/// GET /api/getProductCategories/{id}
pub async fn get_product_categories(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<String>> {
    let names = db_products::category_names(&state.pool, &id).await?;
    if names.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::CategoryNotFound,
            "No categories found for this product",
        )
        .into());
    }
    Ok(Json(names))
}

/// POST /api/getProductsByCategory
pub async fn get_products_by_category(
    State(state): State<AppState>,
    Json(req): Json<ProductsByCategory>,
) -> ApiResult<Vec<ProductSummary>> {
    let products = db_products::find_by_categories(&state.pool, &req.category_ids).await?;
    Ok(Json(products))
}

/// GET /api/searchProducts?query=
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<ProductSearch>,
) -> ApiResult<Vec<Product>> {
    let query = required_text(params.query.as_deref().unwrap_or_default(), "query")?;
    let products = db_products::search(&state.pool, query).await?;
    Ok(Json(products))
}

/// POST /api/updateProductField
pub async fn update_product_field(
    State(state): State<AppState>,
    Json(req): Json<ProductFieldUpdate>,
) -> ApiResult<Value> {
    let id = required_text(&req.id, "id")?;
    let field_name = required_text(&req.field, "field")?;

    let field = EditableField::parse(field_name).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::FieldNotEditable,
            format!("Field {field_name} cannot be edited"),
        )
        .with_detail("field", field_name)
    })?;
    let value = field.value(&req.new_value).ok_or_else(|| match field {
        EditableField::Price => {
            AppError::with_message(ErrorCode::ProductInvalidPrice, "Invalid price")
        }
        _ => AppError::validation(format!("Invalid value for {}", field.column())),
    })?;

    if db_products::update_field(&state.pool, id, field, &value).await? == 0 {
        return Err(product_not_found(id).into());
    }

    let new_value = match value {
        FieldValue::Text(text) => json!(text),
        FieldValue::Price(price) => json!(price),
    };
    tracing::info!(product_id = %id, field = field.column(), "Product field updated");
    Ok(Json(json!({
        "id": id,
        "field": field.column(),
        "newValue": new_value,
    })))
}

/// GET /api/getAllHealthMarkings
pub async fn get_all_health_markings(
    State(state): State<AppState>,
) -> ApiResult<Vec<HealthMarking>> {
    Ok(Json(db_products::health_markings(&state.pool).await?))
}
