use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{ORDER_STATUS_PENDING, ProductOrder, ProductOrderCreate, order_details_text};

use super::{ApiResult, required_text};
use crate::db::orders::{self as db_orders, NewProductOrder};
use crate::error::ServiceError;
use crate::state::AppState;

/// POST /api/addNewProductOrder
pub async fn add_new_product_order(
    State(state): State<AppState>,
    Json(req): Json<ProductOrderCreate>,
) -> Result<(StatusCode, Json<ProductOrder>), ServiceError> {
    let username = required_text(&req.username, "username")?;
    let phone_number = required_text(&req.phone_number, "phoneNumber")?;
    let order_details = order_details_text(&req.order_details);
    if order_details.trim().is_empty() {
        return Err(AppError::required("orderDetails").into());
    }
    if req.total_price < Decimal::ZERO {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "totalPrice must not be negative",
        )
        .into());
    }
    let status = req
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(ORDER_STATUS_PENDING);
    let email = req.email.as_deref().map(str::trim).filter(|e| !e.is_empty());

    let order = db_orders::create(
        &state.pool,
        &NewProductOrder {
            username,
            phone_number,
            order_details: &order_details,
            total_price: req.total_price,
            status,
            email,
        },
    )
    .await?;

    tracing::info!(order_id = order.id, "Product order created");
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/getAllProductOrders
pub async fn get_all_product_orders(
    State(state): State<AppState>,
) -> ApiResult<Vec<ProductOrder>> {
    Ok(Json(db_orders::find_all(&state.pool).await?))
}

/// DELETE /api/deleteProductOrder/{id}
pub async fn delete_product_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, ServiceError> {
    if db_orders::delete(&state.pool, id).await? == 0 {
        return Err(AppError::with_message(ErrorCode::OrderNotFound, "Order not found").into());
    }
    Ok(ApiResponse::ok_with_message("Order deleted successfully"))
}
