//! Application state for zofa-server

use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::catalog::ProductWriter;
use crate::config::Config;
use crate::db::{CatalogStore, PgStore, postgres::connect_pool};
use crate::live::StockBroadcaster;
use crate::push::{FcmSender, PushSender};
use crate::storage::{ObjectStore, S3ObjectStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool (single-table CRUD)
    pub pool: PgPool,
    /// Transactional catalog access (multi-table product writes)
    pub catalog: Arc<dyn CatalogStore>,
    /// Live stock / order fan-out
    pub live: StockBroadcaster,
    /// Product pictures
    pub images: Arc<dyn ObjectStore>,
    /// Push notifications
    pub push: Arc<dyn PushSender>,
    pub image_key_prefix: String,
    pub latest_app_version: String,
    pub force_update: bool,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = connect_pool(
            &config.database_url,
            config.db_max_connections,
            config.db_acquire_timeout,
        )
        .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!(
            max_connections = config.db_max_connections,
            "Database ready"
        );

        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let s3 = S3Client::new(&aws_config);

        Ok(Self {
            catalog: Arc::new(PgStore::new(pool.clone())),
            pool,
            live: StockBroadcaster::new(),
            images: Arc::new(S3ObjectStore::new(
                s3,
                config.s3_bucket.clone(),
                config.image_base_url.clone(),
            )),
            push: Arc::new(FcmSender::new(config.fcm.clone())),
            image_key_prefix: config.image_key_prefix.clone(),
            latest_app_version: config.latest_app_version.clone(),
            force_update: config.force_update,
        })
    }

    pub fn products(&self) -> ProductWriter {
        ProductWriter::new(self.catalog.clone())
    }
}
