use axum::body::Bytes;
use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::{
    error::{AppError, Result},
    models::upload::{StoredObject, UploadedObject},
    state::AppState,
};

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 500 * 1024 * 1024;
/// Request body ceiling for the upload route: the payload plus multipart framing.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024 * 1024;
/// Lifetime of URLs minted by `signed_url`.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(3600);

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A file received from the admin console.
pub struct UploadPayload {
    pub bytes: Bytes,
    pub file_name: String,
    pub content_type: Option<String>,
}

/// Builds the object key `{unix_millis}-{file name}`.
///
/// Two uploads of the same name within the same millisecond collide and the
/// later one wins.
pub fn object_key(file_name: &str, now: DateTime<Utc>) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .filter(|b| !b.is_empty())
        .unwrap_or("upload");
    format!("{}-{}", now.timestamp_millis(), base)
}

/// Declared content type, else sniffed from the bytes, else octet-stream.
fn resolve_content_type(declared: Option<String>, bytes: &[u8]) -> String {
    declared
        .filter(|ct| !ct.is_empty() && ct != FALLBACK_CONTENT_TYPE)
        .or_else(|| infer::get(bytes).map(|kind| kind.mime_type().to_string()))
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}

/// Rejects payloads above `MAX_UPLOAD_BYTES`.
pub fn check_size(len: usize) -> Result<()> {
    if len > MAX_UPLOAD_BYTES {
        return Err(AppError::PayloadTooLarge(format!(
            "{} bytes exceeds the {} MiB limit",
            len,
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Stores a payload in the bucket and returns where it went.
pub async fn upload(state: &AppState, payload: UploadPayload) -> Result<UploadedObject> {
    check_size(payload.bytes.len())?;

    let key = object_key(&payload.file_name, Utc::now());
    let content_type = resolve_content_type(payload.content_type, &payload.bytes);
    let checksum = blake3::hash(&payload.bytes).to_hex().to_string();
    let size = payload.bytes.len();

    tracing::info!(
        "⬆️ Uploading {} ({} bytes, {})",
        key,
        size,
        content_type
    );

    state
        .objects
        .put(&key, payload.bytes, &content_type, &checksum)
        .await?;

    tracing::info!("✅ Upload stored: {}", key);

    Ok(UploadedObject {
        message: "File uploaded successfully".to_string(),
        url: state.objects.public_url(&key),
        key,
        size,
        checksum,
    })
}

/// Lists every object in the bucket.
pub async fn list(state: &AppState) -> Result<Vec<StoredObject>> {
    state.objects.list().await
}

/// Deletes an object. Missing keys are not an error.
pub async fn delete(state: &AppState, key: &str) -> Result<()> {
    state.objects.delete(key).await?;
    tracing::info!("🗑️ Object deleted: {}", key);
    Ok(())
}

/// Mints a one-hour GET URL for `key`.
pub async fn signed_url(state: &AppState, key: &str) -> Result<String> {
    state.objects.presign_get(key, SIGNED_URL_TTL).await
}
