//! Picture upload API
//!
//! POST /api/uploadPicture - multipart `file` + `filename` → object storage
//!
//! Pictures are stored at `{prefix}/{filename}.jpeg`, the same key the
//! product delete path removes.

use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};

use crate::error::ServiceError;
use crate::state::AppState;
use crate::storage::{ObjectStore, image_key};

/// Maximum file size (20MB)
const MAX_FILE_SIZE: usize = 20 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/uploadPicture", post(upload_picture))
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub file_url: String,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::with_message(
            ErrorCode::FileTooLarge,
            format!("File too large (max {MAX_FILE_SIZE} bytes)"),
        );
    }
    AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
}

/// Key-safe picture name: no path separators or parent references
fn picture_name(raw: &str) -> Result<&str, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::new(ErrorCode::NoFilename));
    }
    if name.contains(['/', '\\']) || name.contains("..") {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            "filename must not contain path separators",
        )
        .with_detail("filename", name));
    }
    Ok(name)
}

/// POST /api/uploadPicture
pub async fn upload_picture(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ServiceError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut original_filename: Option<String> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string());
        match field_name.as_deref() {
            Some("file") => {
                original_filename = field.file_name().map(|s| s.to_string());
                file_data = Some(field.bytes().await.map_err(multipart_error)?.to_vec());
            }
            Some("filename") => {
                filename = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let data = file_data.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile).into());
    }
    let name = picture_name(filename.as_deref().unwrap_or_default())?;

    let content_type = original_filename
        .as_deref()
        .map(|f| mime_guess::from_path(f).first_or(mime_guess::mime::IMAGE_JPEG))
        .unwrap_or(mime_guess::mime::IMAGE_JPEG)
        .to_string();

    let key = image_key(&state.image_key_prefix, name);
    let size = data.len();
    let file_url = state.images.put(&key, data, &content_type).await?;

    tracing::info!(key = %key, size, content_type = %content_type, "Picture uploaded");
    Ok(Json(UploadResponse {
        message: "File uploaded successfully".into(),
        file_url,
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;

    use super::*;
    use crate::api::test_support::TestApp;

    const BOUNDARY: &str = "zofa-boundary";

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, file_name, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match file_name {
                Some(f) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/uploadPicture")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn upload_stores_picture_under_product_key() {
        let app = TestApp::new().await;
        let request = multipart_request(&[
            ("file", Some("pita.png"), &[0x89, b'P', b'N', b'G'][..]),
            ("filename", None, &b"B001"[..]),
        ]);

        let (status, body) = app.request(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "File uploaded successfully");
        assert_eq!(body["fileUrl"], "https://cdn.zofa.test/images/B001.jpeg");
        let stored = app.images.get("images/B001.jpeg").unwrap();
        assert_eq!(stored.body, vec![0x89, b'P', b'N', b'G']);
        assert_eq!(stored.content_type, "image/png");
    }

    #[tokio::test]
    async fn upload_without_file_is_rejected() {
        let app = TestApp::new().await;
        let (status, body) = app
            .request(multipart_request(&[("filename", None, &b"B001"[..])]))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], ErrorCode::NoFileProvided.code());
    }

    #[tokio::test]
    async fn upload_without_filename_is_rejected() {
        let app = TestApp::new().await;
        let (status, body) = app
            .request(multipart_request(&[("file", Some("a.jpg"), &b"jpeg"[..])]))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], ErrorCode::NoFilename.code());
    }

    #[test]
    fn picture_names_cannot_escape_prefix() {
        assert!(picture_name("../secrets").is_err());
        assert!(picture_name("a/b").is_err());
        assert_eq!(picture_name(" B001 ").unwrap(), "B001");
    }
}
