use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{
    config::{Credentials, Region},
    error::DisplayErrorContext,
    presigning::PresigningConfig,
    primitives::ByteStream,
    Client as S3Client,
};
use axum::body::Bytes;
use chrono::DateTime;
use std::time::Duration;

use crate::config::StorageConfig;
use crate::error::{AppError, Result};
use crate::models::upload::StoredObject;
use crate::storage::ObjectStore;

/// Object metadata key the upload checksum is stored under.
const CHECKSUM_METADATA_KEY: &str = "blake3";

fn storage_error<E: std::error::Error>(op: &str, e: E) -> AppError {
    AppError::UpstreamStorage(format!("{} failed: {}", op, DisplayErrorContext(e)))
}

/// An S3-compatible bucket (AWS, Cloudflare R2, MinIO, ...).
#[derive(Clone)]
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
    public_base: String,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, bucket: String, public_base: String) -> Self {
        Self { client, bucket, public_base }
    }

    /// Builds the client from configuration. Static keys win over the default chain.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id.clone(),
                secret.to_string(),
                None,
                None,
                "riyobox-env",
            ));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }

        let shared = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.endpoint.is_some())
            .build();

        let public_base = match &config.endpoint {
            Some(endpoint) => format!("{}/{}", endpoint, config.bucket),
            None => format!("https://{}.s3.amazonaws.com", config.bucket),
        };

        tracing::info!("✅ Object storage client ready for bucket {}", config.bucket);
        Self::new(S3Client::from_conf(s3_config), config.bucket.clone(), public_base)
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, body: Bytes, content_type: &str, checksum: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .metadata(CHECKSUM_METADATA_KEY, checksum)
            .send()
            .await
            .map_err(|e| storage_error("PutObject", e))?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredObject>> {
        let mut objects = Vec::new();
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| storage_error("ListObjectsV2", e))?;
            for object in page.contents() {
                let Some(key) = object.key() else { continue };
                objects.push(StoredObject {
                    key: key.to_string(),
                    size: object.size().unwrap_or(0),
                    last_modified: object
                        .last_modified()
                        .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos())),
                    url: self.public_url(key),
                });
            }
        }

        Ok(objects)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| storage_error("DeleteObject", e))?;
        Ok(())
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| AppError::Internal(format!("Invalid presign window: {}", e)))?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| storage_error("Presign GetObject", e))?;
        Ok(request.uri().to_string())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }
}
