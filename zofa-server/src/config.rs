//! Server configuration

use std::time::Duration;

use crate::push::FcmCredentials;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Zofa server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Upper bound on pooled connections
    pub db_max_connections: u32,
    /// How long a request waits for a free connection before giving up
    pub db_acquire_timeout: Duration,
    /// S3 bucket for product pictures
    pub s3_bucket: String,
    /// CloudFront or S3 base URL pictures are served from
    pub image_base_url: String,
    /// Key prefix inside the bucket
    pub image_key_prefix: String,
    pub fcm: FcmCredentials,
    /// Reported by `/api/checkVersion`
    pub latest_app_version: String,
    pub force_update: bool,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let s3_bucket = std::env::var("S3_BUCKET").unwrap_or_else(|_| "zofa-pictures".into());
        let image_base_url = std::env::var("IMAGE_BASE_URL")
            .unwrap_or_else(|_| format!("https://{s3_bucket}.s3.amazonaws.com"));

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: Self::parsed("HTTP_PORT", 8080),
            db_max_connections: Self::parsed("DB_MAX_CONNECTIONS", 10),
            db_acquire_timeout: Duration::from_secs(Self::parsed("DB_ACQUIRE_TIMEOUT_SECS", 5)),
            s3_bucket,
            image_base_url,
            image_key_prefix: std::env::var("IMAGE_KEY_PREFIX")
                .unwrap_or_else(|_| "images".into()),
            fcm: FcmCredentials {
                project_id: Self::require_secret("FCM_PROJECT_ID", &environment)?,
                client_email: Self::require_secret("FCM_CLIENT_EMAIL", &environment)?,
                private_key: Self::require_secret("FCM_PRIVATE_KEY", &environment)?,
                token_uri: std::env::var("FCM_TOKEN_URI")
                    .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".into()),
            },
            latest_app_version: std::env::var("LATEST_APP_VERSION")
                .unwrap_or_else(|_| "1.1.0".into()),
            force_update: Self::parsed("FORCE_UPDATE", true),
            environment,
        })
    }
}
