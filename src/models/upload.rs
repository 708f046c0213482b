use chrono::{DateTime, Utc};
use serde::Serialize;

/// An object listed from the bucket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
    pub url: String,
}

/// The response to a successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedObject {
    pub message: String,
    pub url: String,
    pub key: String,
    pub size: usize,
    /// BLAKE3 digest of the payload, hex encoded.
    pub checksum: String,
}
