//! Health check and app version endpoints

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "zofa-server",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": shared::util::now_millis(),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub latest_version: String,
    pub force_update: bool,
}

/// GET /api/checkVersion
pub async fn check_version(State(state): State<AppState>) -> Json<VersionInfo> {
    Json(VersionInfo {
        latest_version: state.latest_app_version.clone(),
        force_update: state.force_update,
    })
}
