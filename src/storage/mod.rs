//! Object storage behind the upload endpoints.

pub mod memory;
pub mod s3;

use async_trait::async_trait;
use axum::body::Bytes;
use std::time::Duration;

use crate::error::Result;
use crate::models::upload::StoredObject;

pub use memory::InMemoryObjectStore;
pub use s3::S3ObjectStore;

/// A bucket of opaque objects addressed by key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `body` under `key`, replacing anything already there.
    async fn put(&self, key: &str, body: Bytes, content_type: &str, checksum: &str) -> Result<()>;

    /// Enumerates every object in the bucket.
    async fn list(&self) -> Result<Vec<StoredObject>>;

    /// Removes `key`. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;

    /// A time-limited GET URL for `key`.
    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String>;

    /// The permanent (unsigned) URL of `key`.
    fn public_url(&self, key: &str) -> String;
}
