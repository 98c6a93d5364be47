use axum::Json;
use axum::extract::State;
use shared::error::{AppError, ErrorCode};
use shared::models::{NotificationRequest, NotificationSent};

use super::{ApiResult, required_text};
use crate::db::users;
use crate::push::PushSender;
use crate::state::AppState;

/// POST /api/sendNotification
pub async fn send_notification(
    State(state): State<AppState>,
    Json(req): Json<NotificationRequest>,
) -> ApiResult<NotificationSent> {
    let phone_number = required_text(&req.phone_number, "phoneNumber")?;
    let title = required_text(&req.title, "title")?;
    let body = required_text(&req.body, "body")?;

    let token = users::find_fcm_token(&state.pool, phone_number)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::PushTokenNotFound,
                "No push token registered for this phone number",
            )
        })?;

    let message_id = state.push.send(&token, title, body).await?;
    tracing::info!(phone_number = %phone_number, message_id = %message_id, "Notification sent");

    Ok(Json(NotificationSent {
        message: "Notification sent successfully".into(),
        response: message_id,
    }))
}
