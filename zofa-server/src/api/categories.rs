use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Category, CategoryCreate};

use super::{ApiResult, conflict_as, required_text};
use crate::db::categories;
use crate::error::ServiceError;
use crate::state::AppState;

/// POST /api/addNewCategory
pub async fn add_new_category(
    State(state): State<AppState>,
    Json(req): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<Category>), ServiceError> {
    let name = required_text(&req.name, "name")?;
    let category = categories::create(&state.pool, name)
        .await
        .map_err(conflict_as(
            ErrorCode::CategoryNameExists,
            format!("Category {name} already exists"),
        ))?;

    tracing::info!(category_id = category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/getAllCategories
pub async fn get_all_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    Ok(Json(categories::find_all(&state.pool).await?))
}

/// DELETE /api/deleteCategory/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, ServiceError> {
    if categories::delete(&state.pool, id).await? == 0 {
        return Err(AppError::with_message(
            ErrorCode::CategoryNotFound,
            format!("Category {id} not found"),
        )
        .into());
    }
    tracing::info!(category_id = id, "Category deleted");
    Ok(ApiResponse::ok_with_message("Category deleted successfully"))
}
