use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::Result,
    services::auth::{self as auth_service, Credentials, Registration},
    state::AppState,
    validation::auth::{validate_credentials, validate_registration},
};

/// Handles user registration.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Registration>,
) -> Result<Response> {
    validate_registration(&payload)?;

    let session = auth_service::register(&state, payload).await?;

    Ok((StatusCode::CREATED, Json(session)).into_response())
}

/// Handles user login.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Response> {
    validate_credentials(&payload)?;

    let session = auth_service::authenticate(&state, payload).await?;

    Ok((StatusCode::OK, Json(session)).into_response())
}
