//! Object storage for product pictures
//!
//! Pictures are stored at `{prefix}/{name}.jpeg` and served from a public
//! base URL (CloudFront in front of the bucket).

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object storage request failed: {0}")]
    Upstream(String),
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `key` and return its durable public URL
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str)
    -> Result<String, StorageError>;

    /// Remove `key`; deleting a missing key succeeds
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    fn url(&self, key: &str) -> String;
}

/// Object key of a product's picture
pub fn image_key(prefix: &str, name: &str) -> String {
    format!("{}/{name}.jpeg", prefix.trim_end_matches('/'))
}

fn join_url(base_url: &str, key: &str) -> String {
    format!("{}/{key}", base_url.trim_end_matches('/'))
}

pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
    base_url: String,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, bucket: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body.into())
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "S3 upload failed");
                StorageError::Upstream(e.to_string())
            })?;

        tracing::info!(key = %key, "Image uploaded to S3");
        Ok(self.url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "S3 delete failed");
                StorageError::Upstream(e.to_string())
            })?;

        tracing::info!(key = %key, "Image deleted from S3");
        Ok(())
    }

    fn url(&self, key: &str) -> String {
        join_url(&self.base_url, key)
    }
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// In-process store for route tests
#[cfg(test)]
#[derive(Default)]
pub struct MemoryObjectStore {
    base_url: String,
    objects: dashmap::DashMap<String, StoredObject>,
}

#[cfg(test)]
impl MemoryObjectStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: dashmap::DashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.get(key).map(|o| o.value().clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }
}

#[cfg(test)]
#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.objects.insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(self.url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.remove(key);
        Ok(())
    }

    fn url(&self, key: &str) -> String {
        join_url(&self.base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_keys_use_jpeg_suffix() {
        assert_eq!(image_key("images", "B001"), "images/B001.jpeg");
        assert_eq!(image_key("images/", "B001"), "images/B001.jpeg");
    }

    #[tokio::test]
    async fn memory_store_put_get_delete() {
        let store = MemoryObjectStore::new("https://cdn.example.com/");
        let url = store
            .put("images/B001.jpeg", vec![1, 2, 3], "image/jpeg")
            .await
            .unwrap();
        assert_eq!(url, "https://cdn.example.com/images/B001.jpeg");
        assert_eq!(store.get("images/B001.jpeg").unwrap().body, vec![1, 2, 3]);

        store.delete("images/B001.jpeg").await.unwrap();
        assert!(!store.contains("images/B001.jpeg"));
        store.delete("images/B001.jpeg").await.unwrap();
    }
}
