use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;

use crate::{
    error::Result,
    models::movie::{Movie, MovieFilter},
    models::session::Identity,
    models::user::PublicUser,
    services::movies::{self as movie_service, MovieDraft},
    state::AppState,
};

/// A bare confirmation body.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Json<Self> {
        Json(Self { message: message.to_string() })
    }
}

/// Creates a catalog item.
#[axum::debug_handler]
pub async fn create_movie(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(draft): Json<MovieDraft>,
) -> Result<Response> {
    tracing::info!("🎬 Create movie requested by {}", identity.user_id);
    let movie = movie_service::create_movie(&state, draft).await?;
    Ok((StatusCode::CREATED, Json(movie)).into_response())
}

/// Lists the whole catalog, unfiltered.
pub async fn list_movies(State(state): State<AppState>) -> Result<Json<Vec<Movie>>> {
    let movies = movie_service::list_movies(&state, &MovieFilter::default()).await?;
    Ok(Json(movies))
}

/// Deletes a catalog item.
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    movie_service::delete_movie(&state, &movie_id).await?;
    Ok(MessageResponse::new("Movie removed"))
}

/// Lists every account without password hashes.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<PublicUser>>> {
    let users = state.users.list().await?;
    Ok(Json(users.iter().map(PublicUser::from).collect()))
}
