use async_trait::async_trait;
use axum::body::Bytes;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::upload::StoredObject;
use crate::storage::ObjectStore;

#[derive(Clone)]
struct Entry {
    body: Bytes,
    content_type: String,
    checksum: String,
    last_modified: DateTime<Utc>,
}

/// A process-local bucket, for tests and local development.
pub struct InMemoryObjectStore {
    bucket: String,
    objects: RwLock<BTreeMap<String, Entry>>,
}

impl InMemoryObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    /// Returns the stored body, content type and checksum of `key`.
    pub async fn get(&self, key: &str) -> Option<(Bytes, String, String)> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|e| (e.body.clone(), e.content_type.clone(), e.checksum.clone()))
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, key: &str, body: Bytes, content_type: &str, checksum: &str) -> Result<()> {
        self.objects.write().await.insert(
            key.to_string(),
            Entry {
                body,
                content_type: content_type.to_string(),
                checksum: checksum.to_string(),
                last_modified: Utc::now(),
            },
        );
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredObject>> {
        Ok(self
            .objects
            .read()
            .await
            .iter()
            .map(|(key, entry)| StoredObject {
                key: key.clone(),
                size: entry.body.len() as i64,
                last_modified: Some(entry.last_modified),
                url: self.public_url(key),
            })
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String> {
        Ok(format!("{}?expires_in={}", self.public_url(key), ttl.as_secs()))
    }

    fn public_url(&self, key: &str) -> String {
        format!("memory://{}/{}", self.bucket, key)
    }
}
