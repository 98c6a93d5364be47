//! Bread types and daily bread orders

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    BreadOrder, BreadOrderCreate, BreadOrderQuery, BreadOrderStatusUpdate, BreadPriceUpdate,
    BreadType, BreadTypeCreate, ORDER_STATUS_PENDING, order_details_text,
};
use shared::util::normalize_phone_number;

use super::{ApiResult, conflict_as, required_text};
use crate::db::bread::{self as db_bread, NewBreadOrder};
use crate::error::ServiceError;
use crate::state::AppState;

fn order_not_found() -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, "Bread Order not found")
}

fn non_negative_price(price: Decimal, field: &str) -> Result<Decimal, AppError> {
    if price < Decimal::ZERO {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must not be negative"),
        )
        .with_detail("field", field));
    }
    Ok(price)
}

/// POST /api/addNewBreadType
pub async fn add_new_bread_type(
    State(state): State<AppState>,
    Json(req): Json<BreadTypeCreate>,
) -> Result<(StatusCode, Json<BreadType>), ServiceError> {
    let name = required_text(&req.name, "name")?;
    let price = non_negative_price(req.price.ok_or_else(|| AppError::required("price"))?, "price")?;
    let quantity = req.quantity.unwrap_or(0);
    if quantity < 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "quantity must not be negative",
        )
        .into());
    }

    let bread = db_bread::create_type(&state.pool, name, price, quantity)
        .await
        .map_err(conflict_as(
            ErrorCode::BreadTypeExists,
            format!("Bread type {name} already exists"),
        ))?;

    tracing::info!(bread_id = bread.id, name = %bread.name, "Bread type created");
    Ok((StatusCode::CREATED, Json(bread)))
}

/// GET /api/showAllBreadTypes
pub async fn show_all_bread_types(State(state): State<AppState>) -> ApiResult<Vec<BreadType>> {
    Ok(Json(db_bread::find_all_types(&state.pool).await?))
}

/// DELETE /api/deleteBreadType/{id}
pub async fn delete_bread_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, ServiceError> {
    if db_bread::delete_type(&state.pool, id).await? == 0 {
        return Err(AppError::new(ErrorCode::BreadTypeNotFound).into());
    }
    Ok(ApiResponse::ok_with_message("Bread type deleted successfully"))
}

/// POST /api/addNewBreadOrder
pub async fn add_new_bread_order(
    State(state): State<AppState>,
    Json(req): Json<BreadOrderCreate>,
) -> Result<(StatusCode, Json<BreadOrder>), ServiceError> {
    let username = required_text(&req.username, "username")?;
    let phone_number = normalize_phone_number(required_text(&req.phone_number, "phoneNumber")?);
    let day = required_text(&req.day, "day")?;
    let order_details = order_details_text(&req.order_details);
    if order_details.trim().is_empty() {
        return Err(AppError::required("orderDetails").into());
    }
    let total_price = non_negative_price(req.total_price, "totalPrice")?;
    let status = req
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(ORDER_STATUS_PENDING);

    let order = db_bread::create_order(
        &state.pool,
        &NewBreadOrder {
            username,
            phone_number: &phone_number,
            order_details: &order_details,
            total_price,
            status,
            day,
        },
    )
    .await?;

    tracing::info!(order_id = order.id, day = %order.day, "Bread order created");
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/getAllBreadOrders?day=
pub async fn get_all_bread_orders(
    State(state): State<AppState>,
    Query(query): Query<BreadOrderQuery>,
) -> ApiResult<Vec<BreadOrder>> {
    let day = query.day.as_deref().map(str::trim).filter(|d| !d.is_empty());
    Ok(Json(db_bread::find_orders(&state.pool, day).await?))
}

/// POST /api/setBreadOrderStatus
pub async fn set_bread_order_status(
    State(state): State<AppState>,
    Json(req): Json<BreadOrderStatusUpdate>,
) -> Result<ApiResponse<()>, ServiceError> {
    let id = req.id.ok_or_else(|| AppError::required("id"))?;
    let status = required_text(&req.status, "status")?;

    if db_bread::set_order_status(&state.pool, id, status).await? == 0 {
        return Err(order_not_found().into());
    }
    tracing::info!(order_id = id, status = %status, "Bread order status updated");
    Ok(ApiResponse::ok_with_message("Order status updated successfully"))
}

/// POST /api/updateBreadPrice/{id}
pub async fn update_bread_price(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<BreadPriceUpdate>,
) -> Result<ApiResponse<()>, ServiceError> {
    let price = non_negative_price(
        req.new_price.ok_or_else(|| AppError::required("newPrice"))?,
        "newPrice",
    )?;

    if db_bread::set_order_price(&state.pool, id, price).await? == 0 {
        return Err(order_not_found().into());
    }
    Ok(ApiResponse::ok_with_message("Bread price updated successfully"))
}

/// DELETE /api/deleteBreadOrder/{id}
pub async fn delete_bread_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, ServiceError> {
    if db_bread::delete_order(&state.pool, id).await? == 0 {
        return Err(order_not_found().into());
    }
    Ok(ApiResponse::ok_with_message("Bread order deleted successfully"))
}
