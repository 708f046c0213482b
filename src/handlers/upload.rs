use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    error::{AppError, Result},
    handlers::admin::MessageResponse,
    models::upload::StoredObject,
    services::uploads::{self as upload_service, UploadPayload},
    state::AppState,
};

/// Multipart field the file must arrive in.
const FILE_FIELD: &str = "file";

#[derive(Serialize)]
pub struct SignedUrlResponse {
    pub url: String,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Multipart(e.body_text())
    }
}

/// Accepts a single `file` part and stores it in the bucket.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let mut payload = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        payload = Some(UploadPayload { bytes, file_name, content_type });
        break;
    }

    let payload = payload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    let uploaded = upload_service::upload(&state, payload).await?;

    Ok((StatusCode::CREATED, Json(uploaded)).into_response())
}

/// Lists everything in the bucket.
pub async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<StoredObject>>> {
    Ok(Json(upload_service::list(&state).await?))
}

/// Deletes an object by key.
pub async fn delete_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<MessageResponse>> {
    upload_service::delete(&state, &key).await?;
    Ok(MessageResponse::new("File deleted successfully"))
}

/// Mints a temporary URL for an object.
pub async fn signed_url(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SignedUrlResponse>> {
    let url = upload_service::signed_url(&state, &key).await?;
    Ok(Json(SignedUrlResponse { url }))
}
