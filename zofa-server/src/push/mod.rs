//! Push notifications via Firebase Cloud Messaging (HTTP v1)
//!
//! Authentication uses a service account: a short-lived RS256 assertion is
//! exchanged for an OAuth access token, cached until shortly before expiry.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Refresh the access token this long before it expires
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Error)]
pub enum PushError {
    #[error("Invalid service account key: {0}")]
    InvalidKey(String),

    #[error("Token exchange failed: {0}")]
    Auth(String),

    #[error("FCM request failed: {0}")]
    Send(String),
}

#[async_trait]
pub trait PushSender: Send + Sync {
    /// Deliver one notification; returns the provider message id.
    async fn send(&self, token: &str, title: &str, body: &str) -> Result<String, PushError>;
}

/// Service account credentials for FCM
#[derive(Debug, Clone)]
pub struct FcmCredentials {
    pub project_id: String,
    pub client_email: String,
    /// PEM, with `\n` escapes allowed (as stored in env files)
    pub private_key: String,
    pub token_uri: String,
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    value: String,
    expires_at: i64,
}

pub struct FcmSender {
    credentials: FcmCredentials,
    http: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl FcmSender {
    pub fn new(credentials: FcmCredentials) -> Self {
        Self {
            credentials,
            http: reqwest::Client::new(),
            token: Mutex::new(None),
        }
    }

    fn send_url(&self) -> String {
        format!(
            "https://fcm.googleapis.com/v1/projects/{}/messages:send",
            self.credentials.project_id
        )
    }

    fn signed_assertion(&self, now: i64) -> Result<String, PushError> {
        let pem = self.credentials.private_key.replace("\\n", "\n");
        let key = EncodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| PushError::InvalidKey(e.to_string()))?;
        let claims = AssertionClaims {
            iss: &self.credentials.client_email,
            scope: FCM_SCOPE,
            aud: &self.credentials.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| PushError::InvalidKey(e.to_string()))
    }

    async fn access_token(&self) -> Result<String, PushError> {
        let now = chrono::Utc::now().timestamp();
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref()
            && token.expires_at - TOKEN_REFRESH_MARGIN_SECS > now
        {
            return Ok(token.value.clone());
        }

        let assertion = self.signed_assertion(now)?;
        let resp = self
            .http
            .post(&self.credentials.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| PushError::Auth(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(PushError::Auth(format!("{status}: {text}")));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| PushError::Auth(e.to_string()))?;
        tracing::debug!(expires_in = token.expires_in, "FCM access token refreshed");

        let value = token.access_token.clone();
        *cached = Some(CachedToken {
            value: token.access_token,
            expires_at: now + token.expires_in,
        });
        Ok(value)
    }
}

#[async_trait]
impl PushSender for FcmSender {
    async fn send(&self, token: &str, title: &str, body: &str) -> Result<String, PushError> {
        let access_token = self.access_token().await?;
        let message = serde_json::json!({
            "message": {
                "token": token,
                "notification": { "title": title, "body": body },
            }
        });

        let resp = self
            .http
            .post(self.send_url())
            .bearer_auth(access_token)
            .json(&message)
            .send()
            .await
            .map_err(|e| PushError::Send(e.to_string()))?;

        let status = resp.status();
        let reply: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| PushError::Send(e.to_string()))?;
        if !status.is_success() {
            return Err(PushError::Send(format!("{status}: {reply}")));
        }

        reply["name"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| PushError::Send(format!("unexpected FCM reply: {reply}")))
    }
}

/// Records notifications instead of sending them
#[cfg(test)]
#[derive(Default)]
pub struct RecordingSender {
    pub sent: std::sync::Mutex<Vec<(String, String, String)>>,
    pub fail: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
#[async_trait]
impl PushSender for RecordingSender {
    async fn send(&self, token: &str, title: &str, body: &str) -> Result<String, PushError> {
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(PushError::Send("provider unavailable".into()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((token.into(), title.into(), body.into()));
        Ok(format!("projects/test/messages/{}", sent.len()))
    }
}
