use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Coupon, CouponCreate, CouponDiscount, CouponValidate};

use super::{ApiResult, conflict_as, required_text};
use crate::db::coupons;
use crate::error::ServiceError;
use crate::state::AppState;

/// POST /api/addNewCoupon
pub async fn add_new_coupon(
    State(state): State<AppState>,
    Json(req): Json<CouponCreate>,
) -> Result<(StatusCode, Json<Coupon>), ServiceError> {
    let code = required_text(&req.code, "code")?;
    let percentage = req.percentage.ok_or_else(|| AppError::required("percentage"))?;
    if !(0..=100).contains(&percentage) {
        return Err(AppError::with_message(
            ErrorCode::CouponInvalidPercentage,
            "percentage must be between 0 and 100",
        )
        .with_detail("percentage", percentage)
        .into());
    }

    let coupon = coupons::create(&state.pool, code, percentage)
        .await
        .map_err(conflict_as(
            ErrorCode::CouponCodeExists,
            format!("Coupon {code} already exists"),
        ))?;

    tracing::info!(coupon_id = coupon.id, "Coupon created");
    Ok((StatusCode::CREATED, Json(coupon)))
}

/// GET /api/getAllCoupons
pub async fn get_all_coupons(State(state): State<AppState>) -> ApiResult<Vec<Coupon>> {
    let all = coupons::find_all(&state.pool).await?;
    if all.is_empty() {
        return Err(AppError::with_message(ErrorCode::CouponNotFound, "No coupons found").into());
    }
    Ok(Json(all))
}

/// DELETE /api/deleteCoupon/{id}
pub async fn delete_coupon(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, ServiceError> {
    if coupons::delete(&state.pool, id).await? == 0 {
        return Err(AppError::new(ErrorCode::CouponNotFound).into());
    }
    Ok(ApiResponse::ok_with_message("Coupon deleted successfully"))
}

/// POST /api/validateCoupon
pub async fn validate_coupon(
    State(state): State<AppState>,
    Json(req): Json<CouponValidate>,
) -> ApiResult<CouponDiscount> {
    let code = required_text(&req.code, "code")?;
    let percentage = coupons::find_percentage(&state.pool, code)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::CouponNotFound, "Invalid coupon code"))?;
    Ok(Json(CouponDiscount { percentage }))
}
