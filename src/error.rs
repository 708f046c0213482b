use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A database error.
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    /// A connection pool error.
    #[error("Connection pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// Missing or malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A reference that is not a well-formed identifier.
    #[error("Invalid {0} ID")]
    InvalidIdentifier(&'static str),

    /// A missing, malformed, tampered or expired bearer token.
    #[error("Not authorized: {0}")]
    Unauthenticated(String),

    /// Unknown email or wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// A valid identity without the required role.
    #[error("Not authorized as an admin")]
    Forbidden,

    /// A well-formed reference with no matching record.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// An account with the same email already exists.
    #[error("User already exists")]
    DuplicateAccount,

    /// An upload above the size limit.
    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    /// A multipart decoding error.
    #[error("Multipart error: {0}")]
    Multipart(String),

    /// The object store rejected or failed a call.
    #[error("Storage error: {0}")]
    UpstreamStorage(String),

    /// An internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }

            AppError::Pool(ref e) => {
                tracing::error!("Connection pool error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }

            AppError::Validation(ref msg) => {
                tracing::debug!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }

            AppError::InvalidIdentifier(_) => {
                tracing::debug!("{}", self);
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            AppError::Unauthenticated(ref msg) => {
                tracing::warn!("Authentication failed: {}", msg);
                (StatusCode::UNAUTHORIZED, self.to_string())
            }

            AppError::InvalidCredentials => {
                tracing::warn!("Invalid credentials");
                (StatusCode::UNAUTHORIZED, self.to_string())
            }

            AppError::Forbidden => {
                tracing::warn!("Authorization failed");
                (StatusCode::FORBIDDEN, self.to_string())
            }

            AppError::NotFound(_) => {
                tracing::debug!("{}", self);
                (StatusCode::NOT_FOUND, self.to_string())
            }

            AppError::DuplicateAccount => {
                tracing::debug!("Duplicate account rejected");
                (StatusCode::CONFLICT, self.to_string())
            }

            AppError::PayloadTooLarge(ref msg) => {
                tracing::warn!("Payload too large: {}", msg);
                (StatusCode::PAYLOAD_TOO_LARGE, self.to_string())
            }

            AppError::Multipart(ref msg) => {
                tracing::warn!("Multipart error: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }

            AppError::UpstreamStorage(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Object storage request failed".to_string())
            }

            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = sonic_rs::to_string(&sonic_rs::json!({
            "message": message
        }))
        .unwrap_or_else(|_| r#"{"message":"Internal server error"}"#.to_string());

        (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
    }
}
