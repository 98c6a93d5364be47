//! App users, admins and push notifications

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub phone_number: String,
    pub username: Option<String>,
    /// Firebase Cloud Messaging registration token
    pub fcm_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserCreate {
    pub phone_number: String,
    pub username: Option<String>,
    pub fcm_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Admin {
    pub phone_number: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminCreate {
    pub phone_number: String,
    pub name: Option<String>,
}

/// `GET /api/checkAdmin/{phoneNumber}` reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCheck {
    pub exists: bool,
}

/// `POST /api/sendNotification` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationRequest {
    pub phone_number: String,
    pub title: String,
    pub body: String,
}

/// `POST /api/sendNotification` reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSent {
    pub message: String,
    /// Provider message id
    pub response: String,
}
