use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use shared::error::{ApiResponse, AppError};
use shared::models::{Note, NoteCreate};

use super::{ApiResult, required_text};
use crate::db::notes;
use crate::error::ServiceError;
use crate::state::AppState;

/// POST /api/addNewNote
pub async fn add_new_note(
    State(state): State<AppState>,
    Json(req): Json<NoteCreate>,
) -> Result<(StatusCode, Json<Note>), ServiceError> {
    let content = required_text(&req.content, "content")?;
    let note = notes::create(&state.pool, content).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/getAllNotes
pub async fn get_all_notes(State(state): State<AppState>) -> ApiResult<Vec<Note>> {
    Ok(Json(notes::find_all(&state.pool).await?))
}

/// DELETE /api/deleteNote/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, ServiceError> {
    if notes::delete(&state.pool, id).await? == 0 {
        return Err(AppError::not_found(format!("Note {id}")).into());
    }
    Ok(ApiResponse::ok_with_message("Note deleted successfully"))
}
