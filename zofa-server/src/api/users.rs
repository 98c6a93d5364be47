//! App users (push registration) and admins

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Admin, AdminCheck, AdminCreate, User, UserCreate};

use super::{ApiResult, conflict_as, required_text};
use crate::db::users;
use crate::error::ServiceError;
use crate::state::AppState;

/// POST /api/addNewUser
pub async fn add_new_user(
    State(state): State<AppState>,
    Json(req): Json<UserCreate>,
) -> Result<(StatusCode, Json<User>), ServiceError> {
    let phone_number = required_text(&req.phone_number, "phoneNumber")?;
    let fcm_token = required_text(req.fcm_token.as_deref().unwrap_or_default(), "fcmToken")?;
    let username = req.username.as_deref().map(str::trim).filter(|u| !u.is_empty());

    let user = users::create_user(&state.pool, phone_number, username, fcm_token)
        .await
        .map_err(conflict_as(ErrorCode::UserExists, "User already exists"))?;

    tracing::info!(phone_number = %user.phone_number, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// DELETE /api/deleteUser/{phoneNumber}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(phone_number): Path<String>,
) -> Result<ApiResponse<()>, ServiceError> {
    if users::delete_user(&state.pool, &phone_number).await? == 0 {
        return Err(AppError::new(ErrorCode::UserNotFound).into());
    }
    Ok(ApiResponse::ok_with_message("User deleted successfully"))
}

/// POST /api/addAdmin
pub async fn add_admin(
    State(state): State<AppState>,
    Json(req): Json<AdminCreate>,
) -> Result<(StatusCode, Json<Admin>), ServiceError> {
    let phone_number = required_text(&req.phone_number, "phoneNumber")?;
    let name = req.name.as_deref().map(str::trim).filter(|n| !n.is_empty());

    let admin = users::create_admin(&state.pool, phone_number, name)
        .await
        .map_err(conflict_as(ErrorCode::AdminExists, "Admin already exists"))?;

    tracing::info!(phone_number = %admin.phone_number, "Admin added");
    Ok((StatusCode::CREATED, Json(admin)))
}

/// GET /api/getAllAdmins
pub async fn get_all_admins(State(state): State<AppState>) -> ApiResult<Vec<Admin>> {
    let admins = users::find_all_admins(&state.pool).await?;
    if admins.is_empty() {
        return Err(AppError::with_message(ErrorCode::AdminNotFound, "No admins found").into());
    }
    Ok(Json(admins))
}

/// DELETE /api/deleteAdmin/{phoneNumber}
pub async fn delete_admin(
    State(state): State<AppState>,
    Path(phone_number): Path<String>,
) -> Result<ApiResponse<()>, ServiceError> {
    if users::delete_admin(&state.pool, &phone_number).await? == 0 {
        return Err(AppError::new(ErrorCode::AdminNotFound).into());
    }
    Ok(ApiResponse::ok_with_message("Admin deleted successfully"))
}

/// GET /api/checkAdmin/{phoneNumber}
pub async fn check_admin(
    State(state): State<AppState>,
    Path(phone_number): Path<String>,
) -> ApiResult<AdminCheck> {
    let exists = users::admin_exists(&state.pool, &phone_number).await?;
    Ok(Json(AdminCheck { exists }))
}

#[cfg(test)]
mod tests {
    use axum::http::Method;
    use serde_json::json;

    use super::*;
    use crate::api::test_support::TestApp;

    #[tokio::test]
    async fn user_needs_push_token() {
        let app = TestApp::new().await;
        let (status, body) = app
            .json(
                Method::POST,
                "/api/addNewUser",
                json!({"phoneNumber": "+972521234567"}),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "fcmToken");
    }

    #[tokio::test]
    async fn admin_needs_phone_number() {
        let app = TestApp::new().await;
        let (status, body) = app
            .json(Method::POST, "/api/addAdmin", json!({"name": "Noa"}))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "phoneNumber");
    }
}
